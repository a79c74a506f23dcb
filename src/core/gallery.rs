use serde::Deserialize;

pub const ALL_TAG: &str = "All";
pub const INITIAL_VISIBLE: usize = 6;
pub const LOAD_MORE_STEP: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub demo_link: String,
    pub code_link: String,
}

impl Project {
    /// 佔位連結寫成 `#`
    pub fn has_demo(&self) -> bool {
        self.demo_link != "#"
    }

    pub fn has_code(&self) -> bool {
        self.code_link != "#"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingControl {
    LoadMore,
    ShowLess,
}

/// Projects 區塊的篩選、分頁與 modal 狀態
#[derive(Debug)]
pub struct ProjectGallery<'a> {
    projects: &'a [Project],
    active_filter: String,
    visible: usize,
    selected: Option<u32>,
}

impl<'a> ProjectGallery<'a> {
    pub fn new(projects: &'a [Project]) -> Self {
        Self {
            projects,
            active_filter: ALL_TAG.to_string(),
            visible: INITIAL_VISIBLE,
            selected: None,
        }
    }

    /// `All` 之後依首次出現順序列出每個 tag
    pub fn tags(&self) -> Vec<&'a str> {
        let mut tags = vec![ALL_TAG];
        for tag in self.projects.iter().flat_map(|p| p.tags.iter()) {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag.as_str());
            }
        }
        tags
    }

    pub fn active_filter(&self) -> &str {
        &self.active_filter
    }

    pub fn set_filter(&mut self, tag: &str) {
        self.active_filter = tag.to_string();
        self.visible = INITIAL_VISIBLE;
    }

    pub fn filtered(&self) -> Vec<&'a Project> {
        if self.active_filter == ALL_TAG {
            return self.projects.iter().collect();
        }
        self.projects
            .iter()
            .filter(|p| p.tags.iter().any(|t| *t == self.active_filter))
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }

    pub fn visible_projects(&self) -> Vec<&'a Project> {
        self.filtered().into_iter().take(self.visible).collect()
    }

    pub fn load_more(&mut self) {
        let total = self.filtered().len();
        self.visible = (self.visible + LOAD_MORE_STEP).min(total);
    }

    pub fn show_less(&mut self) {
        self.visible = INITIAL_VISIBLE;
    }

    pub fn paging_control(&self) -> Option<PagingControl> {
        let total = self.filtered().len();
        if total <= INITIAL_VISIBLE {
            None
        } else if self.visible < total {
            Some(PagingControl::LoadMore)
        } else {
            Some(PagingControl::ShowLess)
        }
    }

    pub fn open(&mut self, project_id: u32) -> Option<&'a Project> {
        let project = self.projects.iter().find(|p| p.id == project_id)?;
        self.selected = Some(project_id);
        Some(project)
    }

    pub fn selected(&self) -> Option<&'a Project> {
        let id = self.selected?;
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    /// 按鍵關閉了 modal 時回傳 true
    pub fn close_on_key(&mut self, key: &str) -> bool {
        if key == "Escape" && self.selected.is_some() {
            self.close();
            return true;
        }
        false
    }
}
