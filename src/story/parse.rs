//! Split a story into its header and forks.

use crate::{
    consts::{FORK_MARKER, LINE_COMMENT_MARKER, TODO_COMMENT_MARKER},
    error::{MetaData, ParseError, ParseErrorKind},
    line::scan::{end_of_line, is_inside_output, is_on_option_line, normalize_name},
    log::{Logger, Warning},
    node::build_tree,
    story::pages::PageDictionary,
};

#[derive(Clone, Debug, Default)]
/// Result of parsing a full story.
pub struct ParsedStory {
    /// Conditional trees of all forks.
    pub forks: PageDictionary,
    /// Text before the first fork, holding story wide directives.
    pub header: String,
    /// Problems found while parsing which did not stop the parse.
    pub errors: Vec<ParseError>,
    /// To-do comments and warnings found while parsing.
    pub logger: Logger,
}

/// Parse a story into its header and forks.
///
/// A line starting with `@` starts a new fork named by the rest of the line. Every
/// problem with a fork is collected in the returned errors and parsing continues with
/// the next fork, except for an `endif` without an open block which abandons the parse.
///
/// # Examples
/// ```
/// # use forkling::parse_story;
/// let content = "\
/// option-color f80
///
/// @start
/// {You wake up in a dark room.}
/// Find the door@door
///
/// @door
/// {It is locked.}
/// ";
///
/// let story = parse_story(content).unwrap();
///
/// assert_eq!(story.header, "option-color f80\n\n");
/// assert_eq!(story.forks.names().collect::<Vec<_>>(), vec!["start", "door"]);
/// assert!(story.errors.is_empty());
/// ```
pub fn parse_story(content: &str) -> Result<ParsedStory, ParseError> {
    let lines = content.lines().map(str::trim).collect::<Vec<_>>();

    let fork_lines = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.starts_with(FORK_MARKER))
        .map(|(i, _)| i)
        .collect::<Vec<_>>();

    let header_end = fork_lines.first().cloned().unwrap_or(lines.len());
    let header = join_lines(&lines[..header_end]);

    let mut story = ParsedStory {
        header,
        ..ParsedStory::default()
    };

    for (i, &header_index) in fork_lines.iter().enumerate() {
        let body_end = fork_lines.get(i + 1).cloned().unwrap_or(lines.len());

        let meta_data = MetaData::from(header_index);
        let name = normalize_name(&lines[header_index][FORK_MARKER.len_utf8()..]);

        if name.is_empty() {
            let error = ParseError::new(ParseErrorKind::UnnamedFork, &meta_data);
            story.errors.push(error);
            continue;
        }

        if story.forks.contains(&name) {
            let error = ParseError::new(ParseErrorKind::DuplicateFork { name }, &meta_data);
            story.errors.push(error);
            continue;
        }

        let body_meta_data = meta_data.offset(1);
        let body = join_lines(&lines[header_index + 1..body_end]);
        let body = strip_comments(&body, &body_meta_data, &mut story.logger);

        let (tree, errors) = build_tree(&name, &body, &body_meta_data)?;

        if tree.is_empty() {
            story
                .logger
                .add_warning(Warning::EmptyFork { name: name.clone() }, &meta_data);
        }

        story.errors.extend(errors);
        story.forks.insert(&name, tree);
    }

    Ok(story)
}

/// Join lines into text where every line ends with a newline.
fn join_lines(lines: &[&str]) -> String {
    lines.iter().fold(String::new(), |mut acc, line| {
        acc.push_str(line);
        acc.push('\n');
        acc
    })
}

/// Remove line comments from the body of a fork.
///
/// A comment marker inside an output block or on an option line is part of the text.
/// Comments are removed up to the end of their line, keeping the newline so that lines
/// keep their position. Comments starting with `TODO` are logged.
fn strip_comments(body: &str, meta_data: &MetaData, logger: &mut Logger) -> String {
    let mut body = body.to_string();
    let mut position = 0;

    while let Some(found) = body[position..].find(LINE_COMMENT_MARKER) {
        let index = position + found;

        if is_inside_output(&body, index) || is_on_option_line(&body, index) {
            position = index + LINE_COMMENT_MARKER.len();
            continue;
        }

        let end = end_of_line(&body, index);
        let comment = body[index + LINE_COMMENT_MARKER.len()..end].trim();

        if comment.starts_with(TODO_COMMENT_MARKER) {
            let line = body[..index].matches('\n').count();
            logger.add_todo(comment, &meta_data.offset(line));
        }

        body.replace_range(index..end, "");
        position = index;
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{log::MessageKind, node::NodeId};

    #[test]
    fn text_before_the_first_fork_is_the_header() {
        let story = parse_story("link-style-text\n\n@start\n{Hi}\n").unwrap();

        assert_eq!(story.header, "link-style-text\n\n");
        assert_eq!(story.forks.len(), 1);
    }

    #[test]
    fn story_without_forks_is_all_header() {
        let story = parse_story("{Hi}\n").unwrap();

        assert!(story.forks.is_empty());
        assert_eq!(story.header, "{Hi}\n");
    }

    #[test]
    fn fork_names_are_normalized() {
        let story = parse_story("@ Dark Room \n{Hi}\n").unwrap();

        assert!(story.forks.contains("darkroom"));
    }

    #[test]
    fn fork_bodies_are_trimmed_lines_up_to_the_next_fork() {
        let story = parse_story("@start\n   {Hi}  \r\n@end\n{Bye}").unwrap();

        assert_eq!(story.forks.get("start").unwrap().root().text, "{Hi}\n");
        assert_eq!(story.forks.get("end").unwrap().root().text, "{Bye}\n");
    }

    #[test]
    fn duplicate_forks_are_reported_and_the_first_is_kept() {
        let story = parse_story("@Start\n{first}\n@ start\n{second}\n").unwrap();

        assert_eq!(story.forks.len(), 1);
        assert_eq!(story.forks.get("start").unwrap().root().text, "{first}\n");
        assert_eq!(
            story.errors,
            vec![ParseError::new(
                ParseErrorKind::DuplicateFork {
                    name: "start".to_string()
                },
                &MetaData::from(2)
            )]
        );
    }

    #[test]
    fn unnamed_forks_are_reported_and_skipped() {
        let story = parse_story("@\n{nothing}\n@start\n{Hi}\n").unwrap();

        assert_eq!(story.forks.len(), 1);
        assert_eq!(story.errors[0].kind, ParseErrorKind::UnnamedFork);
    }

    #[test]
    fn extra_endif_abandons_the_parse() {
        let error = parse_story("@start\n{Hi}\nendif\n").unwrap_err();

        assert!(error.is_fatal());
        assert_eq!(error.meta_data, MetaData::from(2));
    }

    #[test]
    fn unbalanced_conditionals_still_give_a_story() {
        let story = parse_story("@start\nif a\n{Hi}\n").unwrap();

        assert_eq!(story.forks.len(), 1);
        assert_eq!(story.errors.len(), 1);
    }

    #[test]
    fn comments_are_removed_up_to_the_end_of_the_line() {
        let mut logger = Logger::default();
        let body = strip_comments("{a} // note\n// whole line\n{b}\n", &MetaData::from(0), &mut logger);

        assert_eq!(body, "{a} \n\n{b}\n");
    }

    #[test]
    fn comment_markers_in_output_or_options_are_text() {
        let mut logger = Logger::default();
        let text = "{see http://example.com}\nhttp://site@start\n";

        assert_eq!(strip_comments(text, &MetaData::from(0), &mut logger), text);
    }

    #[test]
    fn commented_out_markers_do_not_open_blocks() {
        let story = parse_story("@start\n{a}\n// if b\n{c}\n").unwrap();

        assert!(story.errors.is_empty());
        assert!(story.forks.get("start").unwrap().children(NodeId::ROOT).is_empty());
    }

    #[test]
    fn todo_comments_are_logged_with_their_line() {
        let story = parse_story("@start\n{a}\n// TODO: write the ending\n").unwrap();

        assert_eq!(story.logger.todo_comments.len(), 1);

        let todo = &story.logger.todo_comments[0];
        assert_eq!(todo.meta_data, MetaData::from(2));
        assert_eq!(
            todo.message,
            MessageKind::Todo("write the ending".to_string())
        );
    }

    #[test]
    fn empty_forks_are_warned_about() {
        let story = parse_story("@start\n\n@end\n{Bye}\n").unwrap();

        assert_eq!(story.forks.len(), 2);
        assert_eq!(story.logger.warnings.len(), 1);
    }
}
