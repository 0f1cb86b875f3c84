mod page;
mod policy;
mod state;

pub use page::{Page, VerifyPredicate, VerifyRule};
pub use policy::AdvancementPolicy;
pub use state::TutorialState;
