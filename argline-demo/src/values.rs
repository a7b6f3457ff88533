use std::cell::RefCell;

use crate::Level;

/// Storage bound by the demo parser.
#[derive(Debug, Default)]
pub struct Values {
    pub help: RefCell<bool>,
    pub json: RefCell<bool>,
    pub flag: RefCell<bool>,
    pub string: RefCell<String>,
    pub integer: RefCell<i32>,
    pub level: RefCell<Level>,
    pub opt_string: RefCell<String>,
    pub opt_integer: RefCell<i32>,
    pub opt_level: RefCell<Level>,
    pub strings: RefCell<Vec<String>>,
    pub integers: RefCell<Vec<i32>>,
    pub levels: RefCell<Vec<Level>>,
    pub opt_strings: RefCell<Vec<String>>,
    pub opt_integers: RefCell<Vec<i32>>,
    pub opt_levels: RefCell<Vec<Level>>,
    pub positional_string: RefCell<String>,
    pub positional_integer: RefCell<i32>,
    pub positional_levels: RefCell<Vec<Level>>,
}
