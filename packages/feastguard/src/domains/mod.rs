pub mod intake;
pub mod outreach;
pub mod prediction;
pub mod routing;
