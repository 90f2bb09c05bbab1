#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// Transient message above the signup form. Hidden again after `ttl_ms`.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub text: String,
    pub kind: NoticeKind,
    pub ttl_ms: u32,
}

/// How long notices stay up, per action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeTiming {
    pub signup_ms: u32,
    pub unregister_ms: u32,
}

impl Default for NoticeTiming {
    fn default() -> Self {
        Self {
            signup_ms: 5000,
            unregister_ms: 4000,
        }
    }
}
