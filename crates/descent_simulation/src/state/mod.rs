//! Player FSM: авторитетный конечный автомат персонажа
//!
//! Состояния взаимоисключающие, переходы только явные (`change_state`).
//! Контроллер спрашивает gating-предикаты ПЕРЕД любой мутацией:
//! - can_move / can_jump / can_interact
//! - is_input_locked: весь input за тик пропускается

use bevy::prelude::*;
use crate::logger;


/// Состояния персонажа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum PlayerState {
    /// Стоит на земле
    #[default]
    Idle,
    /// Идёт по земле
    Moving,
    /// В воздухе, летит вверх
    Jumping,
    /// В воздухе, падает
    Falling,
    /// Сидит на стуле (гравитация выключена, идёт restore энергии)
    Sitting,
    /// Спуск по тросу: input заблокирован до конца sequence
    Descending,
    /// Generic interaction (диалог, чтение и т.п.)
    Interacting,
    /// Катсцена: input заблокирован
    Cutscene,
}

impl PlayerState {
    pub const ALL: [PlayerState; 8] = [
        PlayerState::Idle,
        PlayerState::Moving,
        PlayerState::Jumping,
        PlayerState::Falling,
        PlayerState::Sitting,
        PlayerState::Descending,
        PlayerState::Interacting,
        PlayerState::Cutscene,
    ];
}

/// Component: state machine персонажа
///
/// Чистая total-таблица, без failure modes. Терминального состояния нет:
/// из любого состояния можно вернуться в Idle.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerStateMachine {
    current: PlayerState,
    previous: PlayerState,
}

impl PlayerStateMachine {
    pub fn current(&self) -> PlayerState {
        self.current
    }

    pub fn previous(&self) -> PlayerState {
        self.previous
    }

    pub fn is(&self, state: PlayerState) -> bool {
        self.current == state
    }

    /// Переход в новое состояние
    ///
    /// No-op если `new_state == current` (previous не трогаем).
    /// Возвращает true если переход реально произошёл.
    pub fn change_state(&mut self, new_state: PlayerState) -> bool {
        if self.current == new_state {
            return false;
        }

        self.previous = self.current;
        self.current = new_state;

        logger::log(&format!(
            "Player state changed: {:?} -> {:?}",
            self.previous, self.current
        ));
        true
    }

    pub fn can_move(&self) -> bool {
        matches!(
            self.current,
            PlayerState::Idle | PlayerState::Moving | PlayerState::Jumping | PlayerState::Falling
        )
    }

    /// Только с земли: ни air-jump, ни прыжка со стула/троса
    pub fn can_jump(&self) -> bool {
        matches!(self.current, PlayerState::Idle | PlayerState::Moving)
    }

    /// Interaction разрешён и в воздухе (например, упасть на стул),
    /// но не во время спуска и катсцены
    pub fn can_interact(&self) -> bool {
        matches!(
            self.current,
            PlayerState::Idle
                | PlayerState::Moving
                | PlayerState::Jumping
                | PlayerState::Falling
                | PlayerState::Sitting
        )
    }

    pub fn is_input_locked(&self) -> bool {
        matches!(self.current, PlayerState::Descending | PlayerState::Cutscene)
    }
}
