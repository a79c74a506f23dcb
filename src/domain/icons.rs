use serde::Deserialize;

/// 網站內容可引用的所有圖示，未知名稱一律對應 `HelpCircle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum IconKind {
    Linkedin,
    Github,
    LeetCode,
    Facebook,
    Instagram,
    Twitter,
    Code,
    Layout,
    Server,
    BarChart,
    Mail,
    Phone,
    MapPin,
    Send,
    CheckCircle,
    HelpCircle,
}

impl IconKind {
    pub const ALL: [IconKind; 16] = [
        IconKind::Linkedin,
        IconKind::Github,
        IconKind::LeetCode,
        IconKind::Facebook,
        IconKind::Instagram,
        IconKind::Twitter,
        IconKind::Code,
        IconKind::Layout,
        IconKind::Server,
        IconKind::BarChart,
        IconKind::Mail,
        IconKind::Phone,
        IconKind::MapPin,
        IconKind::Send,
        IconKind::CheckCircle,
        IconKind::HelpCircle,
    ];

    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .unwrap_or(IconKind::HelpCircle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            IconKind::Linkedin => "Linkedin",
            IconKind::Github => "Github",
            IconKind::LeetCode => "LeetCode",
            IconKind::Facebook => "Facebook",
            IconKind::Instagram => "Instagram",
            IconKind::Twitter => "Twitter",
            IconKind::Code => "Code",
            IconKind::Layout => "Layout",
            IconKind::Server => "Server",
            IconKind::BarChart => "BarChart",
            IconKind::Mail => "Mail",
            IconKind::Phone => "Phone",
            IconKind::MapPin => "MapPin",
            IconKind::Send => "Send",
            IconKind::CheckCircle => "CheckCircle",
            IconKind::HelpCircle => "HelpCircle",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, IconKind::HelpCircle)
    }
}

impl From<String> for IconKind {
    fn from(name: String) -> Self {
        IconKind::from_name(&name)
    }
}
