//! List and examples of supported features in story text documents.
//!
//! These examples showcase the features as they are written in plain story text files.
//! Text inside of these files will appear like this:
//!
//! ```plain
//! @start
//! {Example text in a story.}
//! ```
//!
//! # Basic story elements
//!
//! ## Forks
//!
//! A story is divided into forks. A fork starts on a line beginning with `@`, followed by
//! its name, and continues until the next fork. Fork names are compared without spaces
//! and case, so `@Dark Room` and `@darkroom` are the same fork.
//!
//! ```plain
//! @Dark Room
//! {It is pitch black.}
//!
//! @cellar
//! {It smells of wet stone.}
//! ```
//!
//! Text before the first fork is the header, which holds directives for the whole
//! story. The first fork is where the story starts.
//!
//! ## Output
//!
//! Text to show is written inside of braces. A block may span several lines and a line
//! may hold several blocks.
//!
//! ```plain
//! {The door creaks open.}
//! {You step inside.}{Nobody is here.}
//! ```
//!
//! Leading asterisks inside a block set its emphasis: one for italic, two for bold and
//! three for both. Emphasis stays until a block without asterisks is met.
//!
//! ```plain
//! {**Stop!}
//! {*she whispered.}
//! ```
//!
//! ## Escapes
//!
//! Some characters are written with escapes:
//!
//! | Escape | Character         | Where              |
//! |--------|-------------------|--------------------|
//! | `\at`  | `@`               | Everywhere         |
//! | `\n`   | newline           | Everywhere         |
//! | `\s`   | `\`               | Everywhere         |
//! | `\lb`  | `{`               | Inside output      |
//! | `\rb`  | `}`               | Inside output      |
//!
//! ## Comments
//!
//! Text following `//` is ignored up to the end of the line, unless it is inside of an
//! output block or on an option line. Comments starting with `TODO` are collected in the
//! interpreter's logger.
//!
//! ```plain
//! {The gate is open.} // TODO: describe the gate
//! ```
//!
//! ## Options
//!
//! An option is written as its text followed by `@` and the fork it goes to. Options
//! are listed below the page.
//!
//! ```plain
//! Go down the stairs@cellar
//! Leave@outside
//! ```
//!
//! With `@@` the option is shown inline with the page content instead.
//!
//! ```plain
//! {You could also try}
//! the window@@window
//! ```
//!
//! # Variables and expressions
//!
//! ## Setting variables
//!
//! Variables hold numbers or booleans and are set with `set`. Names are not case
//! sensitive.
//!
//! ```plain
//! set coins = 10
//! set has_key
//! set !door_open
//! set coins - 2
//! ```
//!
//! `set name` and `set !name` set a variable to `true` or `false`. If no `=` is given
//! and the statement starts with an existing variable, the whole statement is evaluated
//! and assigned to it: `set coins - 2` subtracts 2 from `coins`.
//!
//! `random(n)` gives a whole number from 1 to `n` in assignments.
//!
//! ## Showing variables
//!
//! `get` adds the value of a variable to the page.
//!
//! ```plain
//! {You have}
//! get coins
//! {coins.}
//! ```
//!
//! ## Expressions
//!
//! Expressions support the arithmetic operators `+ - * / % ^`, comparisons
//! `= != < <= > >=`, logic with `& | !` and the functions `sin`, `cos`, `tan`, `round(x)`
//! and `round(x, step)`. `true`, `false` and `pi` are predefined.
//!
//! # Conditions
//!
//! Blocks of text between `if <condition>` and `endif` are only processed if their
//! condition holds. Blocks can be nested.
//!
//! ```plain
//! if coins >= 5
//!     {You can afford the lamp.}
//!     Buy it@shop
//! endif
//! ```
//!
//! Conditions can use `visited`, which is true if the current fork has been visited
//! before, and `exists(name)`, which is true if a variable has been set.
//!
//! ## Timers
//!
//! `if timer is <seconds>` processes the block once the given time has passed on the
//! current page.
//!
//! ```plain
//! if timer is 5
//!     {A clock strikes somewhere.}
//! endif
//! ```
//!
//! ## Text input
//!
//! `if text <mode> <query>` shows a text box and processes the block when the player
//! submits text which matches. Words are matched whole and case is ignored.
//!
//! | Mode   | Matches when the text                      |
//! |--------|--------------------------------------------|
//! | `is`   | is the query                               |
//! | `!is`  | is not the query                           |
//! | `has`  | has every word of the query                |
//! | `!has` | has none of the words of the query         |
//! | `pick` | has any of the comma separated words       |
//!
//! ```plain
//! if text pick hello, hi, hey
//!     {The guard nods back.}
//! endif
//! ```
//!
//! # Other statements
//!
//! `goto <fork>` leaves the current fork immediately. `color <hex>` sets the color of
//! following output.
//!
//! # Header directives
//!
//! | Directive                                | Effect                                 |
//! |------------------------------------------|----------------------------------------|
//! | `link-style-text`                        | Show inline options as plain text      |
//! | `option-default-disable`                 | Never show the restart link            |
//! | `option-color <hex>`                     | Color of options                       |
//! | `option-hover-color <hex>`               | Color of highlighted options           |
//! | `background-color <hex>`                 | Background color                       |
//! | `output-font-size <size>`                | Font size of output                    |
//! | `option-font-size <size>`                | Font size of options                   |
//! | `output-font <name>`                     | Font of output                         |
//! | `option-font <name>`                     | Font of options                        |
//!
//! Color directives take `-light` or `-dark` suffixes to only set the color of one theme.
