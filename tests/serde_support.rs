#[cfg(not(feature = "serde_support"))]
#[test]
fn serde_support_tests() {
    panic!("Feature `serde_support` must be activated to run these integration tests");
}

#[cfg(all(feature = "serde_support", test))]
pub mod tests {
    use forkling::*;
    use serde_json;

    #[test]
    fn saved_state_can_be_stored_and_continued_from() {
        let content = "
@crossing
set torches = 0
{A crossing! Which path do you take?}
Left@torch
Right@dark room

@dark room
if torches > 0
    {Your torch lights the way.}
    set roll = random(6)
endif
{You enter a dark room.}

@torch
set torches + 1
{You find a torch.}
Head back@dark room
";

        let options = RunnerOptions {
            random_seed: Some(3),
            ..RunnerOptions::default()
        };

        let mut story = Interpreter::with_options(options.clone());
        story.load_story(content, None);

        let left = story.snapshot().options[0].id;
        story.select_option(left).unwrap();

        let back = story.snapshot().options[0].id;
        story.select_option(back).unwrap();

        let serialized = serde_json::to_string(&story.save_state()).unwrap();
        let state: SaveState = serde_json::from_str(&serialized).unwrap();

        assert_eq!(state, story.save_state());

        let mut restored = Interpreter::with_options(options);
        restored.load_story(content, None);
        restored.load_state(state).unwrap();

        assert_eq!(restored.current_fork(), Some("darkroom"));
        assert_eq!(restored.variables(), story.variables());
        assert_eq!(restored.snapshot().content, story.snapshot().content);
    }

    #[test]
    fn snapshots_serialize_with_their_items() {
        let story = read_story_from_string("@start\n{**Hello}\nGo@start\n").unwrap();
        let snapshot = story.snapshot();

        let serialized = serde_json::to_string(&snapshot).unwrap();
        let deserialized: Snapshot = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized, snapshot);
    }

    #[test]
    fn random_streams_continue_after_deserialization() {
        let mut rng = StoryRng::with_seed(11);
        rng.next_number();

        let serialized = serde_json::to_string(&rng).unwrap();
        let mut deserialized: StoryRng = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.next_in_range(100), rng.next_in_range(100));
    }
}
