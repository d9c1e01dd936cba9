use crate::training::ConfigDraft;

/// Whether the configuration can be changed.
///
/// The draft only exists while editing, so a locked configuration has
/// nothing to mutate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Locked,
    Editing(ConfigDraft),
}

impl EditState {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    pub fn draft(&self) -> Option<&ConfigDraft> {
        match self {
            Self::Editing(draft) => Some(draft),
            Self::Locked => None,
        }
    }

    pub(crate) fn draft_mut(&mut self) -> Option<&mut ConfigDraft> {
        match self {
            Self::Editing(draft) => Some(draft),
            Self::Locked => None,
        }
    }
}
