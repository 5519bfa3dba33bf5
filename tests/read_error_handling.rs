use forkling::*;

#[test]
fn extra_endif_abandons_the_story() {
    let content = "
@start
{Hello}
endif
";

    let error = read_story_from_string(content).unwrap_err();

    assert!(error.is_fatal());
    assert_eq!(error.meta_data.line(), 4);
}

#[test]
fn extra_endif_leaves_a_loaded_interpreter_without_forks() {
    let mut story = Interpreter::new();
    story.load_story("@start\nendif\n", None);

    assert_eq!(story.current_fork(), None);
    assert!(match story.error() {
        Some(StoryError::Parse(error)) => error.is_fatal(),
        _ => false,
    });
    assert!(!story.error_message().is_empty());
}

#[test]
fn non_fatal_parse_errors_are_all_logged_and_the_story_still_plays() {
    let content = "
@start
{Hello}
if false
{unclosed}

@start
{duplicate}

@
{unnamed}
";

    let story = read_story_from_string(content).unwrap();

    assert_eq!(story.current_fork(), Some("start"));
    assert_eq!(story.logger().errors.len(), 3);
    assert!(!story.error_message().is_empty());
}

#[test]
fn runtime_errors_skip_only_the_offending_line() {
    let content = "
@start
{one}
set = 3
{two}
get
{three}
this line means nothing
{four}
";

    let story = read_story_from_string(content).unwrap();
    let snapshot = story.snapshot();

    assert_eq!(
        snapshot
            .content
            .iter()
            .map(Item::text)
            .collect::<Vec<_>>(),
        vec!["one", "two", "three", "four"]
    );
    assert_eq!(story.logger().errors.len(), 3);

    let lines = story
        .logger()
        .errors
        .iter()
        .map(|message| message.meta_data.line())
        .collect::<Vec<_>>();

    assert_eq!(lines, vec![4, 6, 8]);
}

#[test]
fn the_error_slot_holds_the_latest_error() {
    let content = "
@start
get first
get second
";

    let story = read_story_from_string(content).unwrap();

    assert_eq!(
        story.error(),
        Some(&StoryError::UnknownVariable {
            name: "second".to_string(),
            meta_data: MetaData::from(3),
        })
    );
}

#[test]
fn the_error_slot_is_cleared_when_new_forks_are_set() {
    let mut story = read_story_from_string("@start\nget missing\n").unwrap();
    assert!(story.error().is_some());

    let forks = parse_story("@start\n{fine}\n").unwrap().forks;
    story.set_entries(forks);

    assert_eq!(story.error(), None);
    assert_eq!(story.error_message(), "");
}

#[test]
fn empty_stories_report_that_they_have_no_forks() {
    let mut story = Interpreter::new();
    story.load_story("", None);

    assert_eq!(story.error(), Some(&StoryError::NoForks));
    assert!(story.snapshot().content.is_empty());
}

#[test]
fn selecting_an_option_which_is_not_shown_is_an_error() {
    let mut story = read_story_from_string("@start\nGo@start\n").unwrap();

    assert_eq!(
        story.select_option(OptionId(99)),
        Err(StoryError::InvalidOption { id: OptionId(99) })
    );
    assert_eq!(story.current_fork(), Some("start"));
}

#[test]
fn loading_a_state_for_a_missing_fork_is_an_error() {
    let mut story = read_story_from_string("@start\n{Hi}\n").unwrap();

    let state = SaveState {
        fork: "elsewhere".to_string(),
        variables: VariableSet::new(),
        rng: StoryRng::with_seed(1),
    };

    assert_eq!(
        story.load_state(state),
        Err(StoryError::UnknownFork {
            name: "elsewhere".to_string()
        })
    );
    assert_eq!(story.current_fork(), Some("start"));
}

#[test]
fn todo_comments_and_warnings_are_collected() {
    let content = "
A note for the reader

@start
// TODO: add a description
Leave@nowhere
";

    let story = read_story_from_string(content).unwrap();
    let logger = story.logger();

    assert_eq!(logger.todo_comments.len(), 1);
    assert_eq!(logger.warnings.len(), 2);
    assert!(logger.errors.is_empty());

    let lines = logger
        .iter()
        .map(|message| message.meta_data.line())
        .collect::<Vec<_>>();

    assert_eq!(lines, vec![2, 5, 6]);
}
