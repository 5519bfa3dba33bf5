// Fork and option markers
pub const FORK_MARKER: char = '@';
pub const INLINE_OPTION_MARKER: &'static str = "@@";
pub const OPTION_MARKER: &'static str = "@";

// Comments
pub const LINE_COMMENT_MARKER: &'static str = "//";
pub const TODO_COMMENT_MARKER: &'static str = "TODO";

// Output text
pub const OUTPUT_OPEN: char = '{';
pub const OUTPUT_CLOSE: char = '}';
pub const EMPHASIS_MARKER: char = '*';

// Conditional block keywords
pub const IF_KEYWORD: &'static str = "if";
pub const ENDIF_KEYWORD: &'static str = "endif";

// Condition kinds that are not expressions
pub const TIMER_KEYWORD: &'static str = "timer";
pub const TEXT_KEYWORD: &'static str = "text";
pub const TEXT_QUERY_SEPARATOR: char = ',';
pub const ESCAPED_QUERY_SEPARATOR: &'static str = "\\c";

// Statements
pub const SET_KEYWORD: &'static str = "set";
pub const GET_KEYWORD: &'static str = "get";
pub const GOTO_KEYWORD: &'static str = "goto";
pub const COLOR_KEYWORD: &'static str = "color";

// Synthetic names bound while evaluating conditions and assignments
pub const VISITED_PREFIX: &'static str = "visited";
pub const EXISTS_FUNCTION: &'static str = "exists";
pub const RANDOM_FUNCTION: &'static str = "random";
/// Largest argument to `random` whose integers are all exact as `f64`.
pub const MAX_RANDOM_RANGE: f64 = 9007199254740992.0;

// Header directives
pub const LINK_STYLE_TEXT: &'static str = "link-style-text";
pub const OPTION_DEFAULT_DISABLE: &'static str = "option-default-disable";
pub const OPTION_COLOR: &'static str = "option-color";
pub const OPTION_HOVER_COLOR: &'static str = "option-hover-color";
pub const BACKGROUND_COLOR: &'static str = "background-color";
pub const OUTPUT_FONT_SIZE: &'static str = "output-font-size";
pub const OPTION_FONT_SIZE: &'static str = "option-font-size";
pub const OPTION_FONT: &'static str = "option-font";
pub const OUTPUT_FONT: &'static str = "output-font";

/// Maximum number of `goto` redirects followed while loading a single fork.
pub const MAX_REDIRECT_DEPTH: usize = 64;
