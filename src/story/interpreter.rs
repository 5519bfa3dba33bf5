//! Play a parsed story.

use crate::{
    consts::{
        EMPHASIS_MARKER, EXISTS_FUNCTION, MAX_RANDOM_RANGE, MAX_REDIRECT_DEPTH, OUTPUT_CLOSE,
        OUTPUT_OPEN, RANDOM_FUNCTION, VISITED_PREFIX,
    },
    error::{ApplyError, MetaData, StoryError},
    expression::{Evaluator, EvaluatorOptions, Function, Identifier, Token},
    line::{
        parse_condition, parse_line_kind, scan::is_word_char, scan::normalize_name, unescape,
        ConditionKind, LineKind, OptionLine,
    },
    log::{Logger, Warning},
    node::{NodeId, ParseNode, ParseTree},
    story::{
        header::{parse_color, parse_header, HeaderOptions},
        pages::PageDictionary,
        parse::{parse_story, ParsedStory},
        rng::StoryRng,
        schedule::Scheduler,
        types::{
            Item, OptionId, OptionItem, RunnerOptions, SaveState, Snapshot, StorySettings,
            TextStyle, ThemeColor, Value, VariableSet,
        },
    },
};

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tracing::{debug, trace, warn};

#[derive(Clone, Debug)]
/// Interpreter which plays a story one page at a time.
///
/// The interpreter walks the conditional tree of the current fork and collects what
/// should be shown: output, options and the log of earlier pages. Players move the story
/// forward by selecting options, submitting text or letting time pass, after which the
/// new state is read with [`snapshot`][Interpreter::snapshot].
///
/// Mistakes in the story are put in a single error slot and the rest of the story keeps
/// running.
///
/// # Examples
/// ```
/// # use forkling::Interpreter;
/// let content = "\
/// @start
/// set coins = 3
/// {You have}
/// get coins
/// {coins.}
/// Spend one@shop
///
/// @shop
/// set coins - 1
/// {Now you have}
/// get coins
/// ";
///
/// let mut interpreter = Interpreter::new();
/// interpreter.load_story(content, None);
///
/// let option = interpreter.snapshot().options[0].id;
/// interpreter.select_option(option).unwrap();
///
/// assert_eq!(interpreter.current_fork(), Some("shop"));
/// assert_eq!(interpreter.snapshot().content[1].text(), "2");
/// ```
pub struct Interpreter {
    options: RunnerOptions,
    forks: Arc<PageDictionary>,
    /// Header block of the loaded story, applied again on restart.
    header: String,
    settings: StorySettings,
    header_options: HeaderOptions,
    current_fork: Option<String>,
    variables: VariableSet,
    /// Variables as they were just before the current fork was entered.
    previous_variables: VariableSet,
    /// Random stream as it was just before the current fork was entered.
    previous_rng: StoryRng,
    rng: StoryRng,
    log: Vec<Item>,
    content: Vec<Item>,
    page_options: Vec<OptionItem>,
    output_style: TextStyle,
    option_style: TextStyle,
    option_highlight_style: TextStyle,
    textbox_visible: bool,
    error: Option<StoryError>,
    /// Set when the current walk must not continue.
    stop: bool,
    /// Fork to go to once the current walk has stopped.
    redirect: Option<String>,
    scheduler: Scheduler,
    logger: Logger,
    next_option_id: usize,
    render_token: u64,
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

impl Interpreter {
    /// Create an interpreter without a story, using default options.
    pub fn new() -> Self {
        Interpreter::with_options(RunnerOptions::default())
    }

    /// Create an interpreter without a story.
    pub fn with_options(options: RunnerOptions) -> Self {
        let rng = options
            .random_seed
            .map(StoryRng::with_seed)
            .unwrap_or_default();

        Interpreter {
            options,
            forks: Arc::new(PageDictionary::new()),
            header: String::new(),
            settings: StorySettings::default(),
            header_options: HeaderOptions::default(),
            current_fork: None,
            variables: VariableSet::new(),
            previous_variables: VariableSet::new(),
            previous_rng: rng.clone(),
            rng,
            log: Vec::new(),
            content: Vec::new(),
            page_options: Vec::new(),
            output_style: TextStyle::default(),
            option_style: TextStyle::default(),
            option_highlight_style: TextStyle::default(),
            textbox_visible: false,
            error: None,
            stop: false,
            redirect: None,
            scheduler: Scheduler::default(),
            logger: Logger::default(),
            next_option_id: 0,
            render_token: 0,
        }
    }

    /// Parse a story and start playing it.
    ///
    /// The story starts at the given fork if it exists, otherwise at the first fork.
    /// All problems found while parsing are reported. If the story cannot be parsed at all
    /// the interpreter is left without forks.
    pub fn load_story(&mut self, content: &str, fork: Option<&str>) {
        self.reset_session();
        self.logger = Logger::default();

        match parse_story(content) {
            Ok(parsed) => self.start_parsed(parsed, fork),
            Err(error) => {
                self.forks = Arc::new(PageDictionary::new());
                self.header.clear();
                self.report(error.into());
            }
        }
    }

    /// Start playing an already parsed story.
    pub(crate) fn start_parsed(&mut self, parsed: ParsedStory, fork: Option<&str>) {
        let ParsedStory {
            forks,
            header,
            errors,
            logger,
        } = parsed;

        self.logger.extend(logger);
        self.process_header_options(&header);

        for error in errors {
            self.report(error.into());
        }

        self.install(forks, fork);
    }

    /// Replace the forks of the story and load the first one.
    pub fn set_entries(&mut self, forks: PageDictionary) {
        self.set_entries_with_fork(forks, None);
    }

    /// Replace the forks of the story and load a fork.
    ///
    /// If the fork is not given or does not exist the first fork is loaded. Content, log
    /// and the current error are cleared.
    pub fn set_entries_with_fork(&mut self, forks: PageDictionary, fork: Option<&str>) {
        self.content.clear();
        self.log.clear();
        self.page_options.clear();
        self.error = None;
        self.variables.clear();
        self.previous_variables.clear();

        self.install(forks, fork);
    }

    fn install(&mut self, forks: PageDictionary, fork: Option<&str>) {
        self.forks = Arc::new(forks);

        let requested = fork
            .map(normalize_name)
            .filter(|name| self.forks.contains(name));

        match requested.or_else(|| self.forks.first().map(str::to_string)) {
            Some(name) => self.set_fork(&name),
            None => {
                self.current_fork = None;
                self.report(StoryError::NoForks);
            }
        }
    }

    /// Read story wide settings and styles from a header block.
    ///
    /// The header is kept and applied again when the story is restarted.
    pub fn process_header_options(&mut self, header: &str) {
        let mut logger = Logger::default();
        let (options, errors) = parse_header(header, &MetaData::default(), &mut logger);

        self.logger.extend(logger);
        self.header = header.to_string();
        self.apply_header_options(options);

        for error in errors {
            self.report(error);
        }
    }

    fn apply_header_options(&mut self, options: HeaderOptions) {
        self.settings = options.settings.clone();
        self.output_style = options.output_style.clone();
        self.option_style = options.option_style.clone();
        self.option_highlight_style = options.option_highlight_style.clone();
        self.header_options = options;
    }

    /// Go to a fork.
    ///
    /// The current page is moved to the log and the fork is walked from its root.
    /// `goto` statements met on the way are followed.
    pub fn set_fork(&mut self, name: &str) {
        self.load_with_redirects(normalize_name(name), 0);
        self.refresh();
    }

    /// Submit text entered by the player.
    ///
    /// Every pending `text` block of the page is tested against the text, in the order
    /// they were met. Blocks which match are processed with the text bound. If one of them
    /// leaves the page, the rest are dropped.
    pub fn submit_text(&mut self, text: &str) {
        debug!(text, "text submitted");

        let forks = Arc::clone(&self.forks);
        let tree = match self.current_tree(&forks) {
            Some(tree) => tree,
            None => return,
        };

        let generation = self.scheduler.generation();
        let actions = self.scheduler.actions().to_vec();
        let mut echoed = false;

        for action in actions {
            if self.scheduler.generation() != generation {
                break;
            }

            if !action.query.matches(text) {
                continue;
            }

            if !echoed && self.log_enabled() {
                self.content.push(Item::Input {
                    text: text.to_string(),
                    from_option: false,
                });
                echoed = true;
            }

            trace!(node = action.node.0, "running text action");

            self.stop = false;
            self.process_block(tree, action.node, Some(text));
            self.follow_redirect();
        }

        self.refresh();
    }

    /// Select an option of the current page.
    ///
    /// The option's text is added to the page as input, if the log is kept, and its fork
    /// is loaded.
    pub fn select_option(&mut self, id: OptionId) -> Result<(), StoryError> {
        let option = self
            .current_options()
            .find(|option| option.id == id)
            .cloned()
            .ok_or(StoryError::InvalidOption { id })?;

        debug!(option = %id, fork = %option.fork, "option selected");

        if self.log_enabled() {
            self.content.push(Item::Input {
                text: option.text.clone(),
                from_option: true,
            });
        }

        self.set_fork(&option.fork);

        Ok(())
    }

    /// Restart the story from its first fork.
    ///
    /// Variables, log and styles are reset and the header is applied again.
    pub fn restart(&mut self) {
        debug!("restarting story");

        self.reset_session();

        let header = self.header.clone();
        self.process_header_options(&header);

        match self.forks.first().map(str::to_string) {
            Some(name) => self.set_fork(&name),
            None => self.report(StoryError::NoForks),
        }
    }

    /// Let time pass, running every timer which becomes due in the order they are due.
    pub fn advance_time(&mut self, elapsed: Duration) {
        let target = self.scheduler.now() + elapsed;

        while let Some(timer) = self.scheduler.pop_due(target) {
            let forks = Arc::clone(&self.forks);

            if let Some(tree) = self.current_tree(&forks) {
                debug!(node = timer.node.0, "timer fired");

                self.stop = false;
                self.process_block(tree, timer.node, timer.text.as_deref());
                self.follow_redirect();
            }
        }

        self.scheduler.advance_to(target);
        self.refresh();
    }

    /// Time until the next timer of the page fires, if any is scheduled.
    pub fn next_timer_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    /// Put a message in the error slot, or clear the slot if the message is empty.
    pub fn set_error_message(&mut self, message: &str) {
        if message.is_empty() {
            self.clear_error();
        } else {
            self.error = Some(StoryError::Message(message.to_string()));
            self.refresh();
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.refresh();
    }

    /// Last reported error.
    pub fn error(&self) -> Option<&StoryError> {
        self.error.as_ref()
    }

    /// Last reported error as text, or an empty string if there is none.
    pub fn error_message(&self) -> String {
        self.error
            .as_ref()
            .map(|error| error.to_string())
            .unwrap_or_default()
    }

    /// Everything needed to draw the story as it is now.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            log: self.log.clone(),
            content: self.content.clone(),
            options: self.page_options.clone(),
            textbox_visible: self.textbox_visible,
            show_restart: self.page_options.is_empty() && !self.settings.hide_restart_link,
            error_message: self.error_message(),
        }
    }

    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    /// Variables as they were just before the current fork was entered.
    pub fn previous_variables(&self) -> &VariableSet {
        &self.previous_variables
    }

    pub fn variable(&self, name: &str) -> Option<Value> {
        self.variables.get(&name.to_lowercase()).cloned()
    }

    pub fn current_fork(&self) -> Option<&str> {
        self.current_fork.as_deref()
    }

    pub fn settings(&self) -> &StorySettings {
        &self.settings
    }

    pub fn runner_options(&self) -> &RunnerOptions {
        &self.options
    }

    /// To-do comments, warnings and every error reported since the story was loaded.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Counter which changes every time the visible state may have changed.
    pub fn render_token(&self) -> u64 {
        self.render_token
    }

    /// State needed to continue the story from the start of the current fork.
    pub fn save_state(&self) -> SaveState {
        SaveState {
            fork: self.current_fork.clone().unwrap_or_default(),
            variables: self.previous_variables.clone(),
            rng: self.previous_rng.clone(),
        }
    }

    /// Continue a story from a saved state.
    ///
    /// The saved variables and random stream are restored and the saved fork is loaded
    /// again. The log starts out empty.
    pub fn load_state(&mut self, state: SaveState) -> Result<(), StoryError> {
        if !self.forks.contains(&state.fork) {
            return Err(StoryError::UnknownFork { name: state.fork });
        }

        self.log.clear();
        self.content.clear();
        self.variables = state.variables;
        self.rng = state.rng;

        self.set_fork(&state.fork);

        Ok(())
    }
}

/// Walking the fork trees.
impl Interpreter {
    fn current_tree<'a>(&self, forks: &'a PageDictionary) -> Option<&'a ParseTree> {
        self.current_fork
            .as_ref()
            .and_then(|name| forks.get(name))
    }

    /// Load a fork and follow the `goto` statements it leads to.
    fn load_with_redirects(&mut self, mut name: String, mut redirects: usize) {
        loop {
            self.load_fork(&name);

            match self.redirect.take() {
                Some(next) if redirects >= MAX_REDIRECT_DEPTH => {
                    self.report(StoryError::GotoLimit { name: next });
                    return;
                }
                Some(next) => {
                    redirects += 1;
                    name = next;
                }
                None => return,
            }
        }
    }

    /// Load the fork a walk outside of a fork load redirected to.
    fn follow_redirect(&mut self) {
        if let Some(name) = self.redirect.take() {
            self.load_with_redirects(name, 1);
        }
    }

    fn load_fork(&mut self, name: &str) {
        debug!(fork = name, "loading fork");

        self.stop = false;
        self.redirect = None;

        self.update_log();
        self.content.clear();
        self.page_options.clear();
        self.textbox_visible = false;
        self.scheduler.clear();

        let forks = Arc::clone(&self.forks);

        let tree = match forks.get(name) {
            Some(tree) => tree,
            None => {
                self.current_fork = None;
                self.report(StoryError::UnknownFork {
                    name: name.to_string(),
                });
                return;
            }
        };

        self.current_fork = Some(name.to_string());
        self.previous_variables = self.variables.clone();
        self.previous_rng = self.rng.clone();

        self.process_node(tree, NodeId::ROOT, None);

        if !self.stop {
            self.visit_current_fork();
        }
    }

    /// Process a node if its condition holds.
    fn process_node(&mut self, tree: &ParseTree, id: NodeId, text: Option<&str>) {
        if self.stop {
            return;
        }

        if self.check_condition(tree, id, text) {
            self.process_block(tree, id, text);
        }
    }

    /// Process the text of a node, then its children.
    fn process_block(&mut self, tree: &ParseTree, id: NodeId, text: Option<&str>) {
        let node = match tree.get(id) {
            Some(node) => node,
            None => return,
        };

        self.process_text(node);

        for &child in node.children.iter() {
            if self.stop {
                return;
            }

            self.process_node(tree, child, text);
        }
    }

    /// Whether a node should be processed now.
    ///
    /// Timers and text conditions are never processed immediately unless text has been
    /// submitted: they are scheduled and processed later.
    fn check_condition(&mut self, tree: &ParseTree, id: NodeId, text: Option<&str>) -> bool {
        let node = match tree.get(id) {
            Some(node) => node,
            None => return false,
        };

        match parse_condition(&node.condition) {
            ConditionKind::Always => true,
            ConditionKind::Timer(seconds) => {
                let due = self.scheduler.add_timer(seconds, id, text);
                trace!(node = id.0, ?due, "timer scheduled");

                false
            }
            ConditionKind::InvalidTimer => {
                self.report(StoryError::InvalidTimer {
                    condition: node.condition.clone(),
                    meta_data: node.meta_data.clone(),
                });

                false
            }
            ConditionKind::Text(query) => {
                self.textbox_visible = true;

                if query.is_empty() {
                    self.report(StoryError::EmptyTextQuery {
                        condition: node.condition.clone(),
                        meta_data: node.meta_data.clone(),
                    });

                    return false;
                }

                match text {
                    Some(text) => query.matches(text),
                    None => {
                        self.scheduler.add_action(id, query);
                        false
                    }
                }
            }
            ConditionKind::Expression(expression) => self.evaluate_condition(&expression, node),
        }
    }

    fn evaluate_condition(&mut self, expression: &str, node: &ParseNode) -> bool {
        let mut evaluator = Evaluator::with_options(EvaluatorOptions {
            allow_unknown_identifiers: true,
            unknown_default: Some(Token::identifier("", None)),
            ..EvaluatorOptions::default()
        });

        self.register_variables(&mut evaluator);

        let visited = self
            .current_fork
            .as_ref()
            .and_then(|fork| self.variables.get(&visited_name(fork)))
            .cloned()
            .unwrap_or(Value::Boolean(false));

        evaluator.add_identifier(VISITED_PREFIX, Some(visited.as_literal()));
        evaluator.add_function(Function::new(EXISTS_FUNCTION, 1, |arguments| {
            match arguments {
                [Token::Identifier(Identifier { value: None, .. })] => Ok(Token::Boolean(false)),
                [_] => Ok(Token::Boolean(true)),
                _ => Err(ApplyError::TypeMismatch),
            }
        }));

        match evaluator.evaluate_to_token(&expression.to_lowercase()) {
            Ok(Token::Boolean(result)) => result,
            Ok(other) => {
                self.report(StoryError::ConditionNotBoolean {
                    condition: node.condition.clone(),
                    result: other.to_string(),
                    meta_data: node.meta_data.clone(),
                });

                false
            }
            Err(error) => {
                self.report(StoryError::Expression {
                    statement: node.condition.clone(),
                    error,
                    meta_data: node.meta_data.clone(),
                });

                false
            }
        }
    }

    fn register_variables(&self, evaluator: &mut Evaluator) {
        for (name, value) in self.variables.iter() {
            evaluator.add_identifier(name, Some(value.as_literal()));
        }
    }

    /// Process the text of a node line by line.
    fn process_text(&mut self, node: &ParseNode) {
        let mut rest = node.text.clone();
        let mut line_offset = 0;

        while !rest.is_empty() {
            if self.stop {
                return;
            }

            let line_end = rest.find('\n').unwrap_or_else(|| rest.len());
            let line = rest[..line_end].trim().to_string();
            let meta_data = node.text_meta_data.offset(line_offset);

            match parse_line_kind(&line) {
                LineKind::Output => {
                    if let Some(newlines) = self.process_output(&mut rest, &line, &meta_data) {
                        line_offset += newlines;
                        continue;
                    }
                }
                LineKind::Blank => (),
                LineKind::InlineOption(option) => self.add_option(option, true, &line, &meta_data),
                LineKind::Option(option) => self.add_option(option, false, &line, &meta_data),
                LineKind::Set(statement) => self.process_set(&statement, &line, &meta_data),
                LineKind::Get(name) => self.process_get(&name, &line, &meta_data),
                LineKind::Goto(name) => {
                    self.process_goto(&name, &meta_data);
                    return;
                }
                LineKind::Color(value) => self.process_color(&value, &meta_data),
                LineKind::Unexpected => self.report(StoryError::UnexpectedSymbols {
                    line: line.clone(),
                    meta_data: meta_data.clone(),
                }),
            }

            rest = rest.get(line_end + 1..).unwrap_or("").to_string();
            line_offset += 1;
        }
    }

    /// Add the first output block in the text to the page and remove it from the text.
    ///
    /// Returns the number of lines the block spanned, or `None` if the braces did not
    /// match and the line should be skipped.
    fn process_output(
        &mut self,
        rest: &mut String,
        line: &str,
        meta_data: &MetaData,
    ) -> Option<usize> {
        let open = rest.find(OUTPUT_OPEN);
        let close = rest.find(OUTPUT_CLOSE);

        let (open, close) = match (open, close) {
            (Some(open), Some(close)) if open < close => (open, close),
            _ => {
                self.report(StoryError::UnmatchedBraces {
                    line: line.to_string(),
                    meta_data: meta_data.clone(),
                });

                return None;
            }
        };

        let inner = &rest[open + OUTPUT_OPEN.len_utf8()..close];
        let emphasis = inner
            .chars()
            .take(3)
            .take_while(|&c| c == EMPHASIS_MARKER)
            .count();

        self.output_style.italic = emphasis == 1 || emphasis == 3;
        self.output_style.bold = emphasis >= 2;

        let text = unescape(&inner[emphasis..], true);

        self.content.push(Item::Output {
            text,
            style: self.output_style.clone(),
        });

        let newlines = rest[open..close].matches('\n').count();
        rest.replace_range(open..close + OUTPUT_CLOSE.len_utf8(), "");

        Some(newlines)
    }

    fn add_option(&mut self, option: OptionLine, inline: bool, line: &str, meta_data: &MetaData) {
        if option.fork.is_empty() {
            self.report(StoryError::OptionWithoutTarget {
                line: line.to_string(),
                meta_data: meta_data.clone(),
            });

            return;
        }

        if option.text.is_empty() {
            self.report(StoryError::OptionWithoutText {
                line: line.to_string(),
                meta_data: meta_data.clone(),
            });

            return;
        }

        let exists = self.forks.contains(&option.fork);

        if inline && !exists {
            self.report(StoryError::InlineOptionUnknownFork {
                name: option.fork,
                meta_data: meta_data.clone(),
            });

            return;
        }

        let item = OptionItem {
            id: OptionId(self.next_option_id),
            text: unescape(&option.text, false),
            fork: option.fork,
            inline,
            style: self.option_style.clone(),
            highlight_style: self.option_highlight_style.clone(),
        };

        self.next_option_id += 1;

        if !exists {
            warn!(fork = %item.fork, "option goes to a fork which does not exist");

            self.logger.add_warning(
                Warning::UnknownOptionTarget {
                    text: item.text.clone(),
                    fork: item.fork.clone(),
                },
                meta_data,
            );
        }

        if inline {
            self.content.push(Item::Option(item));
        } else {
            self.page_options.push(item);
        }
    }

    /// Assign a variable.
    ///
    /// `set name = expression` assigns the result of the expression. `set name` and
    /// `set !name` assign `true` and `false`. `set expression`, where the expression starts
    /// with a variable, assigns the result to that variable.
    fn process_set(&mut self, statement: &str, line: &str, meta_data: &MetaData) {
        let statement = statement.to_lowercase();

        let (name, expression) = match split_assignment(&statement) {
            Some((name, expression)) => (name.trim().to_string(), expression.trim()),
            None => {
                let (name, negated) = match statement.strip_prefix('!') {
                    Some(name) => (name.trim(), true),
                    None => (statement.as_str(), false),
                };

                if is_variable_name(name) {
                    let value = Value::Boolean(!negated);
                    self.assign(name, value, meta_data);

                    return;
                }

                let name = statement
                    .chars()
                    .take_while(|&c| is_word_char(c))
                    .collect::<String>();

                if !self.variables.contains_key(&name) {
                    let error = if name.is_empty() {
                        StoryError::InvalidVariableName {
                            name: statement.clone(),
                            meta_data: meta_data.clone(),
                        }
                    } else {
                        StoryError::UnknownVariable {
                            name,
                            meta_data: meta_data.clone(),
                        }
                    };

                    self.report(error);
                    return;
                }

                (name, statement.as_str())
            }
        };

        if let Some(value) = self.evaluate_assignment(expression, line, meta_data) {
            self.assign(&name, value, meta_data);
        }
    }

    fn evaluate_assignment(
        &mut self,
        expression: &str,
        line: &str,
        meta_data: &MetaData,
    ) -> Option<Value> {
        let mut evaluator = Evaluator::with_options(EvaluatorOptions {
            allow_unknown_identifiers: false,
            ..EvaluatorOptions::default()
        });

        self.register_variables(&mut evaluator);

        let rng = Arc::new(Mutex::new(self.rng.clone()));
        let random_rng = Arc::clone(&rng);

        evaluator.add_function(Function::new(RANDOM_FUNCTION, 1, move |arguments| {
            match arguments {
                [Token::Number(max)] if *max >= 1.0 && *max <= MAX_RANDOM_RANGE => {
                    let mut rng = random_rng.lock().map_err(|_| ApplyError::TypeMismatch)?;
                    Ok(Token::Number(rng.next_in_range(max.floor() as u64) as f64))
                }
                _ => Err(ApplyError::TypeMismatch),
            }
        }));

        let result = evaluator.evaluate_to_token(expression);

        if let Ok(guard) = rng.lock() {
            self.rng = StoryRng::clone(&guard);
        }

        match result {
            Ok(token) => match Value::from_token(&token) {
                Some(value) => Some(value),
                None => {
                    self.report(StoryError::NotAValue {
                        statement: line.to_string(),
                        result: token.to_string(),
                        meta_data: meta_data.clone(),
                    });

                    None
                }
            },
            Err(error) => {
                self.report(StoryError::Expression {
                    statement: line.to_string(),
                    error,
                    meta_data: meta_data.clone(),
                });

                None
            }
        }
    }

    /// Set a variable. New variables must have a valid name.
    fn assign(&mut self, name: &str, value: Value, meta_data: &MetaData) {
        if !self.variables.contains_key(name) && !self.is_free_name(name) {
            self.report(StoryError::InvalidVariableName {
                name: name.to_string(),
                meta_data: meta_data.clone(),
            });

            return;
        }

        trace!(variable = name, %value, "variable set");
        self.variables.insert(name.to_string(), value);
    }

    /// Whether a name can be used for a new variable.
    fn is_free_name(&self, name: &str) -> bool {
        is_variable_name(name)
            && !Evaluator::new().is_registered(name)
            && name != VISITED_PREFIX
            && name != EXISTS_FUNCTION
            && name != RANDOM_FUNCTION
    }

    fn process_get(&mut self, name: &str, line: &str, meta_data: &MetaData) {
        if name.split_whitespace().count() != 1 {
            self.report(StoryError::UnexpectedSymbols {
                line: line.to_string(),
                meta_data: meta_data.clone(),
            });

            return;
        }

        match self.variable(name) {
            Some(value) => self.content.push(Item::Output {
                text: value.to_string(),
                style: self.output_style.clone(),
            }),
            None => self.report(StoryError::UnknownVariable {
                name: name.to_lowercase(),
                meta_data: meta_data.clone(),
            }),
        }
    }

    /// Leave the current fork. The walk stops whether or not the fork exists.
    fn process_goto(&mut self, name: &str, meta_data: &MetaData) {
        self.stop = true;

        if self.forks.contains(name) {
            debug!(fork = name, "goto");

            self.visit_current_fork();
            self.redirect = Some(name.to_string());
        } else {
            self.report(StoryError::GotoUnknownFork {
                name: name.to_string(),
                meta_data: meta_data.clone(),
            });
        }
    }

    fn process_color(&mut self, value: &str, meta_data: &MetaData) {
        match parse_color(value) {
            Some(color) => self.output_style.color = ThemeColor::unified(&color),
            None => self.report(StoryError::InvalidColor {
                value: value.to_string(),
                meta_data: meta_data.clone(),
            }),
        }
    }

    /// Mark the current fork as visited, if it has not been already.
    fn visit_current_fork(&mut self) {
        if let Some(fork) = &self.current_fork {
            self.variables
                .entry(visited_name(fork))
                .or_insert(Value::Boolean(true));
        }
    }
}

/// Bookkeeping of pages, log and errors.
impl Interpreter {
    /// Options which can currently be selected: inline options on the page and the
    /// options listed below it.
    fn current_options(&self) -> impl Iterator<Item = &OptionItem> {
        self.content
            .iter()
            .filter_map(|item| match item {
                Item::Option(option) => Some(option),
                _ => None,
            })
            .chain(self.page_options.iter())
    }

    fn log_enabled(&self) -> bool {
        !self.options.hide_log && self.options.log_limit != Some(0)
    }

    /// Move the current page to the log, keeping at most the configured number of items.
    fn update_log(&mut self) {
        if !self.log_enabled() {
            self.log.clear();
            return;
        }

        self.log.extend(self.content.drain(..));

        if let Some(limit) = self.options.log_limit {
            let excess = self.log.len().saturating_sub(limit);
            self.log.drain(..excess);
        }
    }

    /// Clear everything about the current play session but the forks and header.
    fn reset_session(&mut self) {
        self.variables.clear();
        self.previous_variables.clear();
        self.log.clear();
        self.content.clear();
        self.page_options.clear();
        self.textbox_visible = false;
        self.error = None;
        self.stop = false;
        self.redirect = None;
        self.scheduler.clear();
        self.next_option_id = 0;
        self.current_fork = None;
        self.apply_header_options(HeaderOptions::default());
    }

    /// Put an error in the error slot and log it.
    fn report(&mut self, error: StoryError) {
        warn!(%error, "story error");

        self.logger.add_error(error.clone());
        self.error = Some(error);
    }

    fn refresh(&mut self) {
        self.render_token = self.render_token.wrapping_add(1);
    }
}

fn visited_name(fork: &str) -> String {
    format!("{}{}", VISITED_PREFIX, fork)
}

/// Whether a name can hold a variable: word characters which do not start with a digit.
fn is_variable_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(is_word_char)
        && !name.starts_with(|c: char| c.is_ascii_digit())
}

/// Split an assignment at its first `=` which is not part of `!=`, `<=` or `>=`.
fn split_assignment(statement: &str) -> Option<(&str, &str)> {
    let index = statement.char_indices().find_map(|(i, c)| {
        let previous = statement[..i].chars().next_back();

        match (c, previous) {
            ('=', Some('!')) | ('=', Some('<')) | ('=', Some('>')) => None,
            ('=', _) => Some(i),
            _ => None,
        }
    })?;

    Some((&statement[..index], &statement[index + 1..]))
}
