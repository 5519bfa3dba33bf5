use std::{
    env::{args, current_dir},
    fs::read_to_string,
    io::{self, Write},
    path::{Path, PathBuf},
    process::exit,
    time::Duration,
};

use forkling::*;

fn main() -> Result<(), io::Error> {
    let path = match args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let mut assets_dir = current_dir()?;
            assets_dir.push("demos");
            assets_dir.push("assets");

            [assets_dir.as_path(), Path::new("story.txt")]
                .iter()
                .collect()
        }
    };

    let mut story = read_story(&path)?;

    if let Some(error) = story.error() {
        eprintln!("error: {}", error);
    }

    play_story(&mut story)?;
    println!("FIN\n");

    Ok(())
}

fn play_story(story: &mut Interpreter) -> Result<(), io::Error> {
    let mut shown = 0;

    loop {
        let snapshot = story.snapshot();

        shown = print_items(&snapshot.content, shown);
        print_error(&snapshot.error_message);

        if snapshot.options.is_empty() && !snapshot.textbox_visible && story.next_timer_due().is_none()
        {
            return Ok(());
        }

        print_prompt(&snapshot, story.next_timer_due());

        let input = match read_input()? {
            Some(input) => input,
            None => return Ok(()),
        };

        let fork = story.current_fork().map(str::to_string);

        match parse_command(&input, &snapshot) {
            Command::Exit => return Ok(()),
            Command::Restart => {
                story.restart();
                shown = 0;
            }
            Command::Wait(seconds) => story.advance_time(Duration::from_secs_f64(seconds)),
            Command::Select(id) => {
                if let Err(error) = story.select_option(id) {
                    eprintln!("error: {}", error);
                }

                shown = 0;
            }
            Command::Submit(text) => story.submit_text(&text),
        }

        match story.current_fork() {
            None => return Ok(()),
            Some(current) if fork.as_deref() != Some(current) => {
                println!();
                shown = 0;
            }
            _ => (),
        }
    }
}

enum Command {
    Exit,
    Restart,
    Wait(f64),
    Select(OptionId),
    Submit(String),
}

fn parse_command(input: &str, snapshot: &Snapshot) -> Command {
    let input = input.trim();

    if input == "0" || input == "exit" {
        return Command::Exit;
    }

    if input == "restart" {
        return Command::Restart;
    }

    if let Some(seconds) = input
        .strip_prefix("wait")
        .and_then(|rest| rest.trim().parse::<f64>().ok())
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
    {
        return Command::Wait(seconds);
    }

    let options = selectable_options(snapshot);

    match input.parse::<usize>() {
        Ok(i) if i > 0 && i <= options.len() => Command::Select(options[i - 1].id),
        _ => Command::Submit(input.to_string()),
    }
}

/// Inline options come first, in the order they appear on the page.
fn selectable_options(snapshot: &Snapshot) -> Vec<&OptionItem> {
    snapshot
        .content
        .iter()
        .filter_map(|item| match item {
            Item::Option(option) => Some(option),
            _ => None,
        })
        .chain(snapshot.options.iter())
        .collect()
}

fn print_items(items: &[Item], shown: usize) -> usize {
    for item in items.iter().skip(shown) {
        match item {
            Item::Output { text, style } if style.bold => println!("{}", text.to_uppercase()),
            Item::Output { text, .. } => println!("{}", text),
            Item::Input { text, .. } => println!("> {}", text),
            Item::Option(option) => println!("[{}]", option.text),
        }
    }

    items.len()
}

fn print_error(message: &str) {
    if !message.is_empty() {
        eprintln!("error: {}", message);
    }
}

fn print_prompt(snapshot: &Snapshot, next_timer: Option<Duration>) {
    println!();

    for (i, option) in selectable_options(snapshot).iter().enumerate() {
        println!("  {}. {}", i + 1, option.text);
    }

    if snapshot.textbox_visible {
        println!("  (type something to answer)");
    }

    if let Some(due) = next_timer {
        println!("  (something happens in {:.1} s, type `wait <seconds>`)", due.as_secs_f64());
    }

    println!("     ---");
    println!("  0. Exit story");
    println!();
}

fn read_input() -> Result<Option<String>, io::Error> {
    print!("> ");
    io::stdout().flush()?;

    let mut input = String::new();

    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }

    Ok(Some(input))
}

fn read_story(path: &Path) -> Result<Interpreter, io::Error> {
    let content = read_to_string(path)?;

    let mut story = Interpreter::new();
    story.load_story(&content, None);

    if story.current_fork().is_none() {
        eprintln!("error: {}", story.error_message());
        exit(1);
    }

    Ok(story)
}
