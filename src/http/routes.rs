use strum_macros::{EnumIter, IntoStaticStr};

/// The endpoints served by this tool, each serialized as its exact path.
#[derive(Debug, PartialEq, Eq, EnumIter, IntoStaticStr, Clone, Copy)]
pub enum EightbotRoute {
    #[strum(serialize = "/")]
    Root,
    #[strum(serialize = "/slash")]
    Slash,
    #[strum(serialize = "/outgoing")]
    Outgoing,
    #[strum(serialize = "/resources/icon.svg")]
    Icon,
}

impl EightbotRoute {
    pub fn path(self) -> &'static str {
        self.into()
    }
}
