use crate::domain::model::{ScrollState, Section};
use serde::Deserialize;

/// 固定 header 的高度，跳到區塊時上方保留這段距離
pub const HEADER_OFFSET: u32 = 80;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NavLink {
    pub name: String,
    /// 頁內錨點，例如 `#about`
    pub path: String,
}

impl NavLink {
    pub fn section_id(&self) -> &str {
        self.path.strip_prefix('#').unwrap_or(&self.path)
    }
}

pub fn scroll_target(sections: &[Section], section_id: &str) -> Option<u32> {
    sections
        .iter()
        .find(|section| section.id == section_id)
        .map(|section| section.top.saturating_sub(HEADER_OFFSET))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub dark_mode: bool,
    pub menu_open: bool,
}

impl Header {
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn is_link_active(&self, link: &NavLink, state: &ScrollState) -> bool {
        link.section_id() == state.active_section_id
    }

    /// 點擊導覽連結後要捲動到的位置，同時關閉手機選單
    pub fn navigate(&mut self, link: &NavLink, sections: &[Section]) -> Option<u32> {
        self.menu_open = false;
        scroll_target(sections, link.section_id())
    }
}
