use chrono::{DateTime, Duration, Utc};

/// 统计页可选的时间窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsWindow {
    #[default]
    Week,
    TwoWeeks,
    Month,
}

impl StatsWindow {
    pub const ALL: [StatsWindow; 3] = [StatsWindow::Week, StatsWindow::TwoWeeks, StatsWindow::Month];

    pub fn days(&self) -> i64 {
        match self {
            StatsWindow::Week => 7,
            StatsWindow::TwoWeeks => 14,
            StatsWindow::Month => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatsWindow::Week => "Week",
            StatsWindow::TwoWeeks => "Two weeks",
            StatsWindow::Month => "Month",
        }
    }

    /// `<select>` 中使用的值
    pub fn value(&self) -> &'static str {
        match self {
            StatsWindow::Week => "7",
            StatsWindow::TwoWeeks => "14",
            StatsWindow::Month => "30",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.value() == value)
    }

    /// 窗口起点：now 减去窗口天数
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_cutoff_subtracts_window() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        assert_eq!(
            StatsWindow::Week.cutoff(now),
            Utc.with_ymd_and_hms(2026, 10, 9, 12, 0, 0).unwrap()
        );
        assert_eq!(
            StatsWindow::Month.cutoff(now),
            Utc.with_ymd_and_hms(2026, 9, 16, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_select_values() {
        for window in StatsWindow::ALL {
            assert_eq!(StatsWindow::from_value(window.value()), Some(window));
        }
        assert_eq!(StatsWindow::from_value("365"), None);
        assert_eq!(StatsWindow::default(), StatsWindow::Week);
    }
}
