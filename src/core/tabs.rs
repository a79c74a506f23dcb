/// About 區塊的分頁
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSet {
    names: Vec<String>,
    active: usize,
}

impl TabSet {
    pub fn new(names: Vec<String>) -> Self {
        Self { names, active: 0 }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_name(&self) -> Option<&str> {
        self.names.get(self.active).map(String::as_str)
    }

    /// 超出範圍的 index 不改變目前選擇
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.names.len() {
            return false;
        }
        self.active = index;
        true
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        let mut tabs = TabSet::new(vec![
            "Skills".to_string(),
            "Experience".to_string(),
            "Education".to_string(),
        ]);
        assert_eq!(tabs.active_name(), Some("Skills"));
        assert!(tabs.select(2));
        assert_eq!(tabs.active_name(), Some("Education"));
        assert!(!tabs.select(3));
        assert_eq!(tabs.active(), 2);
    }

    #[test]
    fn test_empty_tab_set() {
        let tabs = TabSet::new(Vec::new());
        assert_eq!(tabs.active_name(), None);
        assert!(tabs.names().is_empty());
    }
}
