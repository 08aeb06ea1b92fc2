//! Built-in roster shipped with the engine, in the same CSV layout as a
//! user's warriors/items files.

pub fn builtin_warriors() -> &'static str {
    include_str!("../content/warriors.csv")
}

pub fn builtin_items() -> &'static str {
    include_str!("../content/items.csv")
}
