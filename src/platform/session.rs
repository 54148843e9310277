//! Session lifecycle for a driver: start gate, clock origin, game-over notice

use crate::sim::GameEvent;

/// Tracks whether play has begun and where its clock starts
#[derive(Debug, Clone, Default)]
pub struct Session {
    started: bool,
    /// Host time of the first played frame
    origin: Option<f64>,
    game_over_shown: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave the instruction screen
    pub fn start(&mut self) {
        if !self.started {
            log::info!("Session started");
        }
        self.started = true;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Session-relative time for a frame at host `time`.
    ///
    /// `None` while the start gate is closed, so spawn timers do not run
    /// behind the instruction screen.
    pub fn elapsed(&mut self, time: f64) -> Option<f64> {
        if !self.started {
            return None;
        }
        let origin = *self.origin.get_or_insert(time);
        Some(time - origin)
    }

    /// Final score, the first time a tick reports the game ended
    pub fn take_game_over(&mut self, events: &[GameEvent]) -> Option<u32> {
        if self.game_over_shown {
            return None;
        }
        let score = events.iter().find_map(|event| match event {
            GameEvent::GameOver { score } => Some(*score),
            _ => None,
        })?;
        self.game_over_shown = true;
        Some(score)
    }

    /// New round: the clock restarts, the start gate stays open
    pub fn restart(&mut self) {
        self.origin = None;
        self.game_over_shown = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_holds_time_until_started() {
        let mut session = Session::new();
        assert!(!session.is_started());
        assert_eq!(session.elapsed(1_000.0), None);

        session.start();
        assert_eq!(session.elapsed(5_000.0), Some(0.0));
        assert_eq!(session.elapsed(5_016.0), Some(16.0));
    }

    #[test]
    fn test_game_over_reported_once() {
        let mut session = Session::new();
        session.start();
        assert_eq!(session.take_game_over(&[GameEvent::EnemySpawned]), None);

        let events = [GameEvent::GameOver { score: 70 }];
        assert_eq!(session.take_game_over(&events), Some(70));
        assert_eq!(session.take_game_over(&events), None);
    }

    #[test]
    fn test_restart_rebases_clock() {
        let mut session = Session::new();
        session.start();
        session.elapsed(100.0);
        session.take_game_over(&[GameEvent::GameOver { score: 0 }]);

        session.restart();
        assert!(session.is_started());
        assert_eq!(session.elapsed(9_000.0), Some(0.0));
        assert_eq!(
            session.take_game_over(&[GameEvent::GameOver { score: 10 }]),
            Some(10)
        );
    }
}
