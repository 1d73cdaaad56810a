use css::{Rule, parse_stylesheet};

/// Built-in rules, applied before any author stylesheet.
const UA_CSS: &str = r"
a { color: blue; }
i { font-style: italic; }
b { font-weight: bold; }
small { font-size: 90%; }
big { font-size: 110%; }
pre { background-color: gray; }
input {
    font-size: 16px; font-weight: normal; font-style: normal;
    background-color: lightblue;
}
button {
    font-size: 16px; font-weight: normal; font-style: normal;
    background-color: orange;
}
";

pub fn ua_stylesheet() -> Vec<Rule> {
    parse_stylesheet(UA_CSS)
}
