pub mod ranker;
pub mod recommendation;
