use crate::domain::model::{ScrollState, Section};

/// 提前量：區塊還沒到頂端前就先標為 active
pub const PROBE_OFFSET: u32 = 100;

/// 捲動超過這個像素數，導覽列改為實心樣式
pub const SCROLLED_THRESHOLD: u32 = 50;

/// 依文件順序，第一個包含 `scroll_y + PROBE_OFFSET` 的區塊
pub fn compute_active_section(scroll_y: u32, sections: &[Section]) -> Option<&str> {
    let probe = scroll_y.saturating_add(PROBE_OFFSET);
    sections
        .iter()
        .find(|section| section.contains(probe))
        .map(|section| section.id.as_str())
}

pub fn is_scrolled(scroll_y: u32) -> bool {
    scroll_y > SCROLLED_THRESHOLD
}

/// 單次頁面瀏覽的捲動狀態
///
/// 事件只能透過 [`ScrollSpy::attach`] 取得的 [`ScrollListener`] 進來；
/// listener 釋放後視為頁面結束並重設狀態
#[derive(Debug)]
pub struct ScrollSpy {
    known_ids: Vec<String>,
    state: ScrollState,
}

impl ScrollSpy {
    /// `known_ids` 不可為空，第一個 id 為初始 active 區塊
    pub fn new<I, S>(known_ids: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let known_ids: Vec<String> = known_ids.into_iter().map(Into::into).collect();
        let first = known_ids.first()?.clone();
        Some(Self {
            known_ids,
            state: ScrollState {
                scroll_y: 0,
                active_section_id: first,
            },
        })
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn active_section(&self) -> &str {
        &self.state.active_section_id
    }

    pub fn is_scrolled(&self) -> bool {
        is_scrolled(self.state.scroll_y)
    }

    pub fn attach(&mut self) -> ScrollListener<'_> {
        tracing::debug!("scroll listener attached");
        ScrollListener { spy: self }
    }

    fn apply(&mut self, scroll_y: u32, sections: &[Section]) {
        self.state.scroll_y = scroll_y;

        // 只有頁面宣告過的 id 才能成為 active
        let probe = scroll_y.saturating_add(PROBE_OFFSET);
        let hit = sections
            .iter()
            .filter(|section| self.known_ids.contains(&section.id))
            .find(|section| section.contains(probe));

        if let Some(section) = hit {
            if section.id != self.state.active_section_id {
                tracing::trace!(
                    "active section {} -> {}",
                    self.state.active_section_id,
                    section.id
                );
                self.state.active_section_id = section.id.clone();
            }
        }
    }

    fn reset(&mut self) {
        self.state.scroll_y = 0;
        if let Some(first) = self.known_ids.first() {
            self.state.active_section_id = first.clone();
        }
    }
}

/// 捲動事件的訂閱，drop 即解除
#[derive(Debug)]
pub struct ScrollListener<'a> {
    spy: &'a mut ScrollSpy,
}

impl ScrollListener<'_> {
    /// 處理一次捲動事件，以最新的為準
    pub fn on_scroll(&mut self, scroll_y: u32, sections: &[Section]) -> &ScrollState {
        self.spy.apply(scroll_y, sections);
        &self.spy.state
    }

    pub fn state(&self) -> &ScrollState {
        &self.spy.state
    }

    pub fn is_scrolled(&self) -> bool {
        self.spy.is_scrolled()
    }

    pub fn detach(self) {}
}

impl Drop for ScrollListener<'_> {
    fn drop(&mut self) {
        self.spy.reset();
        tracing::debug!("scroll listener detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<Section> {
        vec![
            Section::new("home", 0, 800),
            Section::new("about", 800, 600),
            Section::new("services", 1400, 500),
            Section::new("projects", 1900, 900),
            Section::new("contact", 2800, 700),
        ]
    }

    fn spy() -> ScrollSpy {
        ScrollSpy::new(["home", "about", "services", "projects", "contact"]).unwrap()
    }

    #[test]
    fn test_probe_uses_lookahead() {
        let sections = layout();
        assert_eq!(compute_active_section(0, &sections), Some("home"));
        assert_eq!(compute_active_section(699, &sections), Some("home"));
        assert_eq!(compute_active_section(700, &sections), Some("about"));
        assert_eq!(compute_active_section(2700, &sections), Some("contact"));
    }

    #[test]
    fn test_every_result_contains_probe() {
        let sections = layout();
        for scroll_y in (0..4000).step_by(7) {
            match compute_active_section(scroll_y, &sections) {
                Some(id) => {
                    let section = sections.iter().find(|s| s.id == id).unwrap();
                    assert!(section.contains(scroll_y + PROBE_OFFSET));
                }
                None => assert!(scroll_y + PROBE_OFFSET >= 3500),
            }
        }
    }

    #[test]
    fn test_overlap_prefers_document_order() {
        let sections = vec![Section::new("a", 0, 500), Section::new("b", 200, 500)];
        assert_eq!(compute_active_section(200, &sections), Some("a"));
    }

    #[test]
    fn test_scrolled_threshold() {
        assert!(!is_scrolled(0));
        assert!(!is_scrolled(50));
        assert!(is_scrolled(51));
        assert!(is_scrolled(10_000));
    }

    #[test]
    fn test_new_requires_sections() {
        assert!(ScrollSpy::new(Vec::<String>::new()).is_none());
        assert_eq!(spy().active_section(), "home");
    }

    #[test]
    fn test_past_content_retains_previous() {
        let sections = layout();
        let mut spy = spy();
        let mut listener = spy.attach();
        listener.on_scroll(2900, &sections);
        assert_eq!(listener.state().active_section_id, "contact");
        let state = listener.on_scroll(9000, &sections);
        assert_eq!(state.active_section_id, "contact");
        assert_eq!(state.scroll_y, 9000);
    }

    #[test]
    fn test_gap_above_first_section_retains_previous() {
        let sections = vec![Section::new("home", 500, 400), Section::new("about", 900, 400)];
        let mut spy = ScrollSpy::new(["home", "about"]).unwrap();
        let mut listener = spy.attach();
        listener.on_scroll(850, &sections);
        assert_eq!(listener.state().active_section_id, "about");
        listener.on_scroll(0, &sections);
        assert_eq!(listener.state().active_section_id, "about");
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let sections = vec![Section::new("ad-banner", 0, 300), Section::new("about", 0, 900)];
        let mut spy = ScrollSpy::new(["home", "about"]).unwrap();
        let mut listener = spy.attach();
        listener.on_scroll(10, &sections);
        assert_eq!(listener.state().active_section_id, "about");
    }

    #[test]
    fn test_detach_resets_page_state() {
        let sections = layout();
        let mut spy = spy();
        {
            let mut listener = spy.attach();
            listener.on_scroll(1500, &sections);
            assert!(listener.is_scrolled());
            assert_eq!(listener.state().active_section_id, "services");
        }
        assert_eq!(spy.active_section(), "home");
        assert!(!spy.is_scrolled());

        let listener = spy.attach();
        listener.detach();
        assert_eq!(spy.state().scroll_y, 0);
    }
}
