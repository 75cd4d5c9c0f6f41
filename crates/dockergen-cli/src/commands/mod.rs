mod generate;

pub use generate::{generate_all, generate_one, parse_template_arg};
