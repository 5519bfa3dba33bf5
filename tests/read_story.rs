use forkling::*;

use std::time::Duration;

fn texts(items: &[Item]) -> Vec<&str> {
    items.iter().map(Item::text).collect()
}

#[test]
fn story_starts_at_the_first_fork() {
    let content = "

@ Mountain Pass
{The pass is covered in snow.}
{A hut is visible further up.}

@hut
{The hut is empty.}

";

    let story = read_story_from_string(content).unwrap();
    let snapshot = story.snapshot();

    assert_eq!(story.current_fork(), Some("mountainpass"));
    assert_eq!(
        texts(&snapshot.content),
        vec!["The pass is covered in snow.", "A hut is visible further up."]
    );
    assert!(snapshot.log.is_empty());
    assert!(snapshot.options.is_empty());
    assert!(snapshot.show_restart);
}

#[test]
fn story_can_start_at_a_named_fork() {
    let content = "
@pass
{The pass is covered in snow.}

@hut
{The hut is empty.}
";

    let mut story = Interpreter::new();
    story.load_story(content, Some("Hut"));

    assert_eq!(story.current_fork(), Some("hut"));
    assert_eq!(texts(&story.snapshot().content), vec!["The hut is empty."]);
}

#[test]
fn unknown_starting_fork_falls_back_to_the_first() {
    let content = "
@pass
{The pass is covered in snow.}
";

    let mut story = Interpreter::new();
    story.load_story(content, Some("summit"));

    assert_eq!(story.current_fork(), Some("pass"));
    assert_eq!(story.error(), None);
}

#[test]
fn selecting_options_moves_between_forks_and_keeps_a_log() {
    let content = "
@crossing
{A crossing! Which path do you take?}
Left@torch
Right@dark room

@dark room
{You enter a dark room.}
Head back@crossing

@torch
{In a small chamber you find a torch.}
";

    let mut story = read_story_from_string(content).unwrap();

    let options = story.snapshot().options;
    assert_eq!(
        options.iter().map(|option| option.text.as_str()).collect::<Vec<_>>(),
        vec!["Left", "Right"]
    );

    story.select_option(options[1].id).unwrap();

    let snapshot = story.snapshot();
    assert_eq!(story.current_fork(), Some("darkroom"));
    assert_eq!(texts(&snapshot.content), vec!["You enter a dark room."]);
    assert_eq!(
        texts(&snapshot.log),
        vec!["A crossing! Which path do you take?", "Right"]
    );

    story.select_option(snapshot.options[0].id).unwrap();
    let options = story.snapshot().options;
    story.select_option(options[0].id).unwrap();

    assert_eq!(story.current_fork(), Some("torch"));
    assert!(story.snapshot().show_restart);
}

#[test]
fn inline_options_are_part_of_the_content() {
    let content = "
link-style-text

@shore
{Waves break against}
the rocks@@rocks
{in the distance.}

@rocks
{The rocks are slippery.}
";

    let mut story = read_story_from_string(content).unwrap();
    let snapshot = story.snapshot();

    assert!(story.settings().discrete_inline_links);
    assert!(snapshot.options.is_empty());
    assert_eq!(
        texts(&snapshot.content),
        vec!["Waves break against", "the rocks", "in the distance."]
    );

    let id = match &snapshot.content[1] {
        Item::Option(option) => {
            assert!(option.inline);
            option.id
        }
        other => panic!("expected an inline option, got {:?}", other),
    };

    story.select_option(id).unwrap();
    assert_eq!(story.current_fork(), Some("rocks"));
}

#[test]
fn goto_follows_through_several_forks() {
    let content = "
@one
{one}
goto two
@two
goto three
{never}
@three
{three}
";

    let story = read_story_from_string(content).unwrap();

    assert_eq!(story.current_fork(), Some("three"));
    assert_eq!(texts(&story.snapshot().content), vec!["three"]);
    assert_eq!(story.variable("visitedone"), Some(Value::Boolean(true)));
    assert_eq!(story.variable("visitedtwo"), Some(Value::Boolean(true)));
}

#[test]
fn conditions_can_check_variables_set_on_earlier_pages() {
    let content = "
@gate
{A guard blocks the gate.}
Pay the toll@pay
Walk through@through

@pay
set paid
{You pay the guard.}
Walk through@through

@through
if exists(paid)
    {The guard lets you pass.}
endif
if !exists(paid)
    {The guard stops you.}
endif
";

    let mut story = read_story_from_string(content).unwrap();
    let options = story.snapshot().options;
    story.select_option(options[1].id).unwrap();

    assert_eq!(texts(&story.snapshot().content), vec!["The guard stops you."]);

    story.restart();

    let options = story.snapshot().options;
    story.select_option(options[0].id).unwrap();
    let options = story.snapshot().options;
    story.select_option(options[0].id).unwrap();

    assert_eq!(
        texts(&story.snapshot().content),
        vec!["The guard lets you pass."]
    );
}

#[test]
fn nested_conditions_are_only_checked_if_their_parent_holds() {
    let content = "
@start
set a = 1
set b = 2
if a = 1
    {a is one}
    if b = 3
        {b is three}
    endif
    if b = 2
        {b is two}
    endif
endif
{done}
";

    let story = read_story_from_string(content).unwrap();

    assert_eq!(
        texts(&story.snapshot().content),
        vec!["a is one", "b is two", "done"]
    );
}

#[test]
fn timed_blocks_appear_after_time_has_passed() {
    let content = "
@platform
{The train is late.}
if timer is 3
    {A whistle sounds in the distance.}
    if timer is 2
        {The train pulls in.}
        Board the train@train
    endif
endif

@train
{The doors close behind you.}
";

    let mut story = read_story_from_string(content).unwrap();

    assert_eq!(story.next_timer_due(), Some(Duration::from_secs(3)));

    story.advance_time(Duration::from_secs(3));
    assert_eq!(
        texts(&story.snapshot().content),
        vec!["The train is late.", "A whistle sounds in the distance."]
    );
    assert_eq!(story.next_timer_due(), Some(Duration::from_secs(2)));
    assert!(story.snapshot().options.is_empty());

    story.advance_time(Duration::from_secs(2));
    assert_eq!(story.snapshot().options.len(), 1);

    let option = story.snapshot().options[0].id;
    story.select_option(option).unwrap();
    assert_eq!(story.current_fork(), Some("train"));
}

#[test]
fn timers_that_are_due_together_fire_in_order() {
    let content = "
@start
if timer is 2
    {second}
endif
if timer is 1
    {first}
endif
";

    let mut story = read_story_from_string(content).unwrap();
    story.advance_time(Duration::from_secs(5));

    assert_eq!(texts(&story.snapshot().content), vec!["first", "second"]);
}

#[test]
fn timers_can_leave_the_fork() {
    let content = "
@bomb
{The fuse is burning.}
if timer is 1
    goto boom
endif
if timer is 2
    {This never shows.}
endif

@boom
{Boom.}
";

    let mut story = read_story_from_string(content).unwrap();
    story.advance_time(Duration::from_secs(3));

    assert_eq!(story.current_fork(), Some("boom"));
    assert_eq!(texts(&story.snapshot().content), vec!["Boom."]);
    assert_eq!(story.next_timer_due(), None);
}

#[test]
fn submitted_text_runs_matching_blocks() {
    let content = "
@door
{A voice asks for the password.}
if text is swordfish
    {The door opens.}
    goto hall
endif
if text !is swordfish
    {Wrong.}
endif

@hall
{You are inside.}
";

    let mut story = read_story_from_string(content).unwrap();
    assert!(story.snapshot().textbox_visible);

    story.submit_text("salmon");
    assert_eq!(
        texts(&story.snapshot().content),
        vec!["A voice asks for the password.", "salmon", "Wrong."]
    );

    story.submit_text("  SwordFish ");
    assert_eq!(story.current_fork(), Some("hall"));
    assert_eq!(texts(&story.snapshot().content), vec!["You are inside."]);
    assert!(!story.snapshot().textbox_visible);
}

#[test]
fn submitted_text_without_matches_is_not_echoed() {
    let content = "
@start
if text has apple
    {An apple.}
endif
";

    let mut story = read_story_from_string(content).unwrap();
    story.submit_text("banana");

    assert!(story.snapshot().content.is_empty());
}

#[test]
fn restart_resets_variables_and_log() {
    let content = "
option-color 123

@start
set count = 1
Again@again

@again
set count + 1
get count
";

    let mut story = read_story_from_string(content).unwrap();
    let option = story.snapshot().options[0].id;
    story.select_option(option).unwrap();

    assert_eq!(story.variable("count"), Some(Value::Number(2.0)));

    story.restart();

    let snapshot = story.snapshot();
    assert_eq!(story.current_fork(), Some("start"));
    assert_eq!(story.variable("count"), Some(Value::Number(1.0)));
    assert!(snapshot.log.is_empty());
    assert_eq!(snapshot.options[0].style.color, ThemeColor::unified("123"));
}

#[test]
fn header_styles_are_applied_to_output_and_options() {
    let content = "
output-font-size 20
option-color-dark fff
option-hover-color 0f0

@start
{Hello}
Go@start
";

    let story = read_story_from_string(content).unwrap();
    let snapshot = story.snapshot();

    match &snapshot.content[0] {
        Item::Output { style, .. } => assert_eq!(style.font_size, Some(20.0)),
        other => panic!("expected output, got {:?}", other),
    }

    let option = &snapshot.options[0];
    assert_eq!(option.style.color.dark, Some("fff".to_string()));
    assert_eq!(option.style.color.light, None);
    assert_eq!(option.highlight_style.color, ThemeColor::unified("0f0"));
}

#[test]
fn forks_can_be_replaced_with_parsed_pages() {
    let first = parse_story("@a\n{a}\n").unwrap();
    let second = parse_story("@b\n{b}\n@c\n{c}\n").unwrap();

    let mut story = Interpreter::new();
    story.set_entries(first.forks);
    assert_eq!(texts(&story.snapshot().content), vec!["a"]);

    story.set_entries_with_fork(second.forks, Some("c"));
    assert_eq!(story.current_fork(), Some("c"));
    assert_eq!(texts(&story.snapshot().content), vec!["c"]);
    assert!(story.snapshot().log.is_empty());
}

#[test]
fn saved_state_continues_from_the_start_of_the_fork() {
    let content = "
@start
set coins = 5
Shop@shop

@shop
set coins - 2
get coins
";

    let mut story = read_story_from_string(content).unwrap();
    let option = story.snapshot().options[0].id;
    story.select_option(option).unwrap();

    let state = story.save_state();
    assert_eq!(state.fork, "shop");
    assert_eq!(state.variables.get("coins"), Some(&Value::Number(5.0)));

    let mut restored = read_story_from_string(content).unwrap();
    restored.load_state(state).unwrap();

    assert_eq!(restored.current_fork(), Some("shop"));
    assert_eq!(texts(&restored.snapshot().content), vec!["3"]);
}

#[test]
fn seeded_stories_draw_the_same_random_numbers() {
    let content = "
@start
set a = random(1000)
set b = random(1000)
";

    let options = RunnerOptions {
        random_seed: Some(42),
        ..RunnerOptions::default()
    };

    let mut first = Interpreter::with_options(options.clone());
    first.load_story(content, None);

    let mut second = Interpreter::with_options(options);
    second.load_story(content, None);

    assert_eq!(first.variables(), second.variables());
}
