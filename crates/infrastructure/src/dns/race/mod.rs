mod dispatcher;

pub use dispatcher::RaceDispatcher;
