mod all;
mod auth;
mod fields;
mod footer;
mod log;
mod popup;
mod splash;
mod task_detail;
mod task_form;
mod task_list;

use self::log::log;
use super::*;
use footer::footer;
use popup::popup;

pub use all::all as render;
