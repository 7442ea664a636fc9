use crate::{
    GameStats, PieceBuffer, PieceSeed,
    core::{Field, Piece, PieceKind, Rotation},
};

/// A move chosen by a [`Strategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    /// Leftmost field column of the piece's bounding box.
    pub column: usize,
    /// Whether to play the held piece instead of the falling one.
    pub use_held: bool,
    /// Orientation to drop the chosen piece in.
    pub rotation: Rotation,
}

/// Decision policy consulted once per move.
///
/// Returning `None` means there is no legal move; the driver ends the game.
/// Closures with the matching signature are strategies too.
pub trait Strategy {
    fn choose_action(&self, field: &Field, active: &Piece, held: Option<&Piece>) -> Option<Action>;
}

impl<F> Strategy for F
where
    F: Fn(&Field, &Piece, Option<&Piece>) -> Option<Action>,
{
    fn choose_action(
        &self,
        field: &Field,
        active: &Piece,
        held: Option<&Piece>,
    ) -> Option<Action> {
        self(field, active, held)
    }
}

/// A game that can be advanced one move at a time by a strategy.
pub trait Driver {
    /// Plays one move. Returns `false` once the game is over.
    fn play<S>(&mut self, strategy: &S) -> bool
    where
        S: Strategy + ?Sized;

    /// Total lines cleared so far.
    fn lines_cleared(&self) -> usize;
}

/// Single-player game with a 7-bag piece queue and a hold slot.
///
/// The hold slot starts filled, so strategies can choose between two pieces
/// from the first move on.
///
/// # Example
///
/// ```
/// use genetris_engine::{Action, Driver, Field, GameDriver, Piece, PieceSeed, Rotation};
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
/// let mut game = GameDriver::with_seed(seed);
///
/// // Always drop the falling piece at the left wall.
/// let leftmost = |_: &Field, _: &Piece, _: Option<&Piece>| {
///     Some(Action { column: 0, use_held: false, rotation: Rotation::Identity })
/// };
/// while game.play(&leftmost) {}
///
/// assert!(game.is_game_over());
/// assert!(game.pieces_placed() > 0);
/// ```
#[derive(Debug, Clone)]
pub struct GameDriver {
    field: Field,
    falling: PieceKind,
    buffer: PieceBuffer,
    stats: GameStats,
    game_over: bool,
}

impl Default for GameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl GameDriver {
    /// Starts a game on an empty standard field with a random piece sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_buffer(Field::new(), PieceBuffer::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_field(Field::new(), seed)
    }

    /// Starts a game on a prepared field.
    #[must_use]
    pub fn with_field(field: Field, seed: PieceSeed) -> Self {
        Self::with_buffer(field, PieceBuffer::with_seed(seed))
    }

    fn with_buffer(field: Field, mut buffer: PieceBuffer) -> Self {
        let falling = buffer.pop_next();
        buffer.fill_hold();
        Self {
            field,
            falling,
            buffer,
            stats: GameStats::new(),
            game_over: false,
        }
    }

    #[must_use]
    pub fn field(&self) -> &Field {
        &self.field
    }

    #[must_use]
    pub fn falling_piece(&self) -> PieceKind {
        self.falling
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<PieceKind> {
        self.buffer.held_piece()
    }

    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.buffer.next_pieces()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn pieces_placed(&self) -> usize {
        self.stats.completed_pieces()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Applies an action to the current position.
    ///
    /// An action that cannot be carried out (no legal drop for the chosen
    /// piece, rotation and column) ends the game.
    pub fn apply(&mut self, action: Action) -> bool {
        if self.game_over {
            return false;
        }
        // The hold slot only changes once the drop has succeeded.
        let kind = if action.use_held {
            self.buffer
                .held_piece()
                .or_else(|| self.buffer.next_pieces().next())
        } else {
            Some(self.falling)
        };
        let Some(kind) = kind else {
            self.game_over = true;
            return false;
        };
        let piece = action.rotation.apply(&Piece::new(kind));
        match self.field.try_drop(&piece, action.column) {
            Ok(landing) => {
                if action.use_held {
                    let swapped = self.buffer.hold(self.falling);
                    debug_assert_eq!(swapped, kind);
                }
                self.stats.complete_piece_drop(landing.cleared_lines);
                self.falling = self.buffer.pop_next();
                true
            }
            Err(_) => {
                self.game_over = true;
                false
            }
        }
    }
}

impl Driver for GameDriver {
    fn play<S>(&mut self, strategy: &S) -> bool
    where
        S: Strategy + ?Sized,
    {
        if self.game_over {
            return false;
        }
        let falling = Piece::new(self.falling);
        let held = self.buffer.held_piece().map(Piece::new);
        let Some(action) = strategy.choose_action(&self.field, &falling, held.as_ref()) else {
            self.game_over = true;
            return false;
        };
        self.apply(action)
    }

    fn lines_cleared(&self) -> usize {
        self.stats.total_cleared_lines()
    }
}
