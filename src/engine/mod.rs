// Engine modules: tick loop, scheduling, input, networking

pub mod game_loop;
pub mod input;
pub mod net;
pub mod scheduler;
