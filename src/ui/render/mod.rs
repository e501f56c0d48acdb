mod all;
mod fields;
mod footer;
mod main;
mod session_detail;
mod sessions;
mod settings;
mod sign_in;
mod sign_up;
mod wizard;

use super::*;
use footer::footer;
use main::main;

pub use all::all as render;
