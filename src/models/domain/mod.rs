pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub mod score;
pub mod user;
pub use quiz::Quiz;
pub use quiz_attempt::{Attempt, AttemptState, AttemptToken};
pub use quiz_question::{OptionIndex, Question};
pub use score::Score;
pub use user::UserContext;
