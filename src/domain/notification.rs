// Notification banner model

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Warning,
    Info,
}

impl BannerKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            BannerKind::Error => "alert-danger",
            BannerKind::Warning => "alert-warning",
            BannerKind::Info => "alert-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub kind: BannerKind,
    pub message: String,
}
