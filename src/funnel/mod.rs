pub mod offers;
pub mod session;

pub use offers::{GATE_ONE_QUESTION, GATE_TWO_QUESTION, Offer, OfferKind};
pub use session::{AnswerOutcome, FunnelSession, FunnelState, GateAnswer, PickOutcome, Prediction};
