//! 预约池表格的筛选、排序与分页

use crate::Pool;
use std::cmp::Ordering;

/// 每页显示的行数
pub const PAGE_SIZE: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    MaximumCount,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// 表格视图状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolTable {
    pub name_filter: String,
    pub description_filter: String,
    pub sort: Option<(SortKey, SortDirection)>,
    pub page: usize,
}

/// 不区分大小写的包含匹配，空筛选条件匹配所有
fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl PoolTable {
    pub fn matches(&self, pool: &Pool) -> bool {
        contains_ci(&pool.display_name, &self.name_filter)
            && contains_ci(&pool.description, &self.description_filter)
    }

    pub fn set_name_filter(&mut self, value: String) {
        self.name_filter = value;
        self.page = 0;
    }

    pub fn set_description_filter(&mut self, value: String) {
        self.description_filter = value;
        self.page = 0;
    }

    /// 点击表头：同一列升序、降序交替，新列从升序开始
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = match self.sort {
            Some((current, SortDirection::Ascending)) if current == key => {
                Some((key, SortDirection::Descending))
            }
            _ => Some((key, SortDirection::Ascending)),
        };
    }

    pub fn sort_indicator(&self, key: SortKey) -> &'static str {
        match self.sort {
            Some((current, SortDirection::Ascending)) if current == key => " ▲",
            Some((current, SortDirection::Descending)) if current == key => " ▼",
            _ => "",
        }
    }

    /// 筛选并排序后的全部行
    pub fn apply(&self, pools: &[Pool]) -> Vec<Pool> {
        let mut rows: Vec<Pool> = pools.iter().filter(|p| self.matches(p)).cloned().collect();
        if let Some((key, direction)) = self.sort {
            rows.sort_by(|a, b| {
                let ord = compare(a, b, key);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        rows
    }

    pub fn page_count(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(PAGE_SIZE).max(1)
    }

    /// 当前页的行，页码超出时落在最后一页
    pub fn visible(&self, pools: &[Pool]) -> Vec<Pool> {
        let rows = self.apply(pools);
        let page = self.page.min(self.page_count(rows.len()) - 1);
        rows.into_iter()
            .skip(page * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }

    pub fn next_page(&mut self, total_rows: usize) {
        if self.page + 1 < self.page_count(total_rows) {
            self.page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }
}

fn compare(a: &Pool, b: &Pool, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a
            .display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase()),
        SortKey::MaximumCount => a.maximum_count.cmp(&b.maximum_count),
        SortKey::Description => a
            .description
            .to_lowercase()
            .cmp(&b.description.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(id: &str, name: &str, description: &str, max: u32) -> Pool {
        Pool {
            pool_id: id.to_string(),
            display_name: name.to_string(),
            description: description.to_string(),
            maximum_count: max,
            enabled: true,
        }
    }

    fn sample() -> Vec<Pool> {
        vec![
            pool("vm1", "Windows Lab", "Office workstations", 10),
            pool("vm2", "Linux Build", "CI runners", 4),
            pool("vm3", "GPU Render", "CUDA workloads for the lab", 2),
        ]
    }

    fn ids(rows: &[Pool]) -> Vec<&str> {
        rows.iter().map(|p| p.pool_id.as_str()).collect()
    }

    #[test]
    fn test_filters_are_case_insensitive_contains() {
        let mut table = PoolTable::default();
        table.set_name_filter("LAB".to_string());
        assert_eq!(ids(&table.apply(&sample())), vec!["vm1"]);

        let mut table = PoolTable::default();
        table.set_description_filter("lab".to_string());
        assert_eq!(ids(&table.apply(&sample())), vec!["vm3"]);
    }

    #[test]
    fn test_filters_combine() {
        let mut table = PoolTable::default();
        table.set_name_filter("u".to_string());
        table.set_description_filter("ci".to_string());
        assert_eq!(ids(&table.apply(&sample())), vec!["vm2"]);
    }

    #[test]
    fn test_toggle_sort_alternates_direction() {
        let mut table = PoolTable::default();
        table.toggle_sort(SortKey::MaximumCount);
        assert_eq!(ids(&table.apply(&sample())), vec!["vm3", "vm2", "vm1"]);
        table.toggle_sort(SortKey::MaximumCount);
        assert_eq!(ids(&table.apply(&sample())), vec!["vm1", "vm2", "vm3"]);
        table.toggle_sort(SortKey::Name);
        assert_eq!(table.sort, Some((SortKey::Name, SortDirection::Ascending)));
        assert_eq!(ids(&table.apply(&sample())), vec!["vm3", "vm2", "vm1"]);
    }

    #[test]
    fn test_paging() {
        let pools: Vec<Pool> = (0..32)
            .map(|i| pool(&format!("vm{i}"), &format!("Pool {i:02}"), "", 1))
            .collect();
        let mut table = PoolTable::default();
        assert_eq!(table.page_count(pools.len()), 3);
        assert_eq!(table.visible(&pools).len(), PAGE_SIZE);

        table.next_page(pools.len());
        table.next_page(pools.len());
        table.next_page(pools.len());
        assert_eq!(table.page, 2);
        assert_eq!(ids(&table.visible(&pools)), vec!["vm30", "vm31"]);

        table.set_name_filter("Pool 0".to_string());
        assert_eq!(table.page, 0);
    }

    #[test]
    fn test_empty_table_has_one_page() {
        let table = PoolTable::default();
        assert_eq!(table.page_count(0), 1);
        assert!(table.visible(&[]).is_empty());
    }
}
