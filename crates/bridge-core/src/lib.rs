pub mod auction;
pub mod card;
pub mod contract;
pub mod error;
pub mod hand;
pub mod play;
pub mod score;
pub mod seat;
pub mod trick;

pub use auction::{Auction, Call};
pub use card::{Card, Rank, Suit};
pub use contract::{Contract, Doubling, Strain};
pub use error::PlayError;
pub use hand::Hand;
pub use play::{GamePhase, PlayState};
pub use score::{calculate_score, calculate_score_with_honors, honors_bonus, ScoreBreakdown};
pub use seat::{Seat, Side, Vulnerability};
pub use trick::{CompletedTrick, Trick};
