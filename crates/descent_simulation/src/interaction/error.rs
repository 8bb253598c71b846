use thiserror::Error;
use crate::state::PlayerState;

/// Почему interaction не состоялся
///
/// Все варианты: "действие не произошло", ничего не паникует.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InteractionRefusal {
    #[error("nothing in range to interact with")]
    NothingInRange,
    #[error("interaction is not allowed in state {0:?}")]
    StateForbids(PlayerState),
    #[error("already sitting")]
    AlreadySitting,
    #[error("not sitting")]
    NotSitting,
    #[error("already used")]
    Spent,
    #[error("seat has no anchor configured")]
    MissingSeatAnchor,
    #[error("descent point has no target configured")]
    MissingDescentTarget,
    #[error("object does not react to interact")]
    NotInteractive,
    #[error("a descent is already scheduled for this entity")]
    DescentAlreadyScheduled,
}

impl InteractionRefusal {
    /// Configuration-missing: ошибка уровня контента, логируется как error
    pub fn is_configuration_missing(&self) -> bool {
        matches!(
            self,
            InteractionRefusal::MissingSeatAnchor | InteractionRefusal::MissingDescentTarget
        )
    }
}
