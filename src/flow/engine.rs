//! Conversation flow engine
//!
//! The engine maps `(session, event)` to an [`Outcome`]: the next session,
//! the messages to send, and the record written if the event completed a
//! flow. It never reads or writes the session store; the transport layer
//! persists `Outcome::session`.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::action::MenuAction;
use super::menu;
use super::profile::{Category, FlowProfile, ParaphraseRequest};
use super::reply::Reply;
use super::step::{next_after, Field, Step, Transition};
use crate::models::{SubmissionRecord, Submitter};
use crate::services::{Paraphraser, SubmissionStore};
use crate::state::Session;
use crate::utils::helpers::{choose_random, escape_html, render_template, truncate_text};
use crate::utils::logging::{log_flow_transition, log_submission};

/// Longest paraphrase shown to the user; keeps replies under Telegram's
/// 4096 character message limit
const MAX_PARAPHRASE_CHARS: usize = 1500;

/// Longest raw answer echoed back or listed in a summary
const MAX_SHOWN_ANSWER_CHARS: usize = 600;

/// Result of handling one event
#[derive(Debug, Clone)]
pub struct Outcome {
    pub session: Session,
    pub replies: Vec<Reply>,
    pub submitted: Option<SubmissionRecord>,
}

impl Outcome {
    fn new(session: Session, replies: Vec<Reply>) -> Self {
        Self {
            session,
            replies,
            submitted: None,
        }
    }
}

pub struct FlowEngine {
    profile: Arc<FlowProfile>,
    paraphraser: Option<Arc<dyn Paraphraser>>,
    submissions: Arc<dyn SubmissionStore>,
}

impl FlowEngine {
    pub fn new(
        profile: Arc<FlowProfile>,
        paraphraser: Option<Arc<dyn Paraphraser>>,
        submissions: Arc<dyn SubmissionStore>,
    ) -> Self {
        Self {
            profile,
            paraphraser,
            submissions,
        }
    }

    pub fn profile(&self) -> &FlowProfile {
        &self.profile
    }

    /// `/start`: abandon any flow and greet
    pub fn start(&self) -> Outcome {
        Outcome::new(
            Session::default(),
            vec![menu::main_menu(&self.profile, &self.profile.texts.welcome)],
        )
    }

    /// `/help`: state is left untouched
    pub fn help(&self, session: Session) -> Outcome {
        Outcome::new(session, vec![Reply::text(&self.profile.texts.help)])
    }

    /// Generic apology with the main menu; the session is cleared
    pub fn failure(&self) -> Outcome {
        Outcome::new(
            Session::default(),
            vec![menu::main_menu(&self.profile, &self.profile.texts.failure)],
        )
    }

    /// Handle a menu button press
    pub fn select(&self, user_id: i64, session: Session, action: &MenuAction) -> Outcome {
        let profile = &*self.profile;
        debug!(user_id = user_id, action = %action, step = ?session.expected, "Menu selection");

        match action {
            MenuAction::MainMenu => {
                log_flow_transition(user_id, session.expected, None, None);
                Outcome::new(Session::default(), vec![menu::main_menu(profile, &profile.texts.menu)])
            }
            MenuAction::Inquiry => {
                if profile.collect_category {
                    log_flow_transition(user_id, session.expected, Some(Step::AwaitCategory), None);
                    Outcome::new(Session::awaiting(Step::AwaitCategory), vec![menu::category_menu(profile)])
                } else {
                    self.begin(user_id, session.expected, None)
                }
            }
            MenuAction::Category(key) => {
                if !profile.collect_category {
                    return Outcome::new(session, vec![menu::main_menu(profile, &profile.texts.menu)]);
                }
                match profile.category_by_key(key) {
                    Some(category) => self.begin(user_id, session.expected, Some(category)),
                    None => {
                        warn!(user_id = user_id, key = %key, "Unknown category selected");
                        Outcome::new(session, vec![menu::category_menu(profile)])
                    }
                }
            }
            MenuAction::Chat => {
                let next = profile.choice.as_ref().map(|_| Step::AwaitChoice);
                log_flow_transition(user_id, session.expected, next, None);
                let session = match next {
                    Some(step) => Session::awaiting(step),
                    None => Session::default(),
                };
                Outcome::new(session, vec![menu::chat_card(profile)])
            }
            MenuAction::Services => Outcome::new(session, vec![menu::services_overview(profile)]),
            MenuAction::Service(key) => match menu::service_details(profile, key) {
                Some(details) => Outcome::new(
                    session,
                    vec![details, menu::main_menu(profile, &profile.texts.menu)],
                ),
                None => {
                    warn!(user_id = user_id, key = %key, "Unknown service selected");
                    Outcome::new(session, vec![menu::services_overview(profile)])
                }
            },
        }
    }

    /// Handle a free-text message
    pub async fn handle_text(
        &self,
        user_id: i64,
        session: Session,
        text: &str,
        submitter: &Submitter,
    ) -> Outcome {
        let profile = &*self.profile;

        let step = match session.expected {
            Some(step) => step,
            None => return Outcome::new(session, vec![Reply::text(&profile.texts.idle)]),
        };

        let text = text.trim();
        if text.is_empty() {
            return self.reprompt(session, step);
        }

        match step {
            Step::AwaitChoice => self.handle_choice(user_id, session, text),
            Step::AwaitCategory => match profile.category_by_input(text) {
                Some(category) => self.begin(user_id, Some(step), Some(category)),
                None => {
                    debug!(user_id = user_id, "Text did not match a category");
                    Outcome::new(session, vec![menu::category_menu(profile)])
                }
            },
            _ => match step.field() {
                Some(field) => self.handle_answer(user_id, session, field, text, submitter).await,
                None => self.failure(),
            },
        }
    }

    /// Start a fresh flow, optionally with the category already chosen
    fn begin(&self, user_id: i64, from: Option<Step>, category: Option<&Category>) -> Outcome {
        let profile = &*self.profile;
        let mut session = Session::default();
        let mut sections = Vec::new();

        if let Some(category) = category {
            session.record_answer(Field::Category, category.label.clone());
            let label = escape_html(&category.label);
            sections.push(render_template(
                &profile.texts.category_selected,
                &[("category", label.as_str())],
            ));
        }

        let first = match profile.first_question() {
            Some(question) => question,
            None => return self.failure(),
        };
        sections.push(first.prompt.clone());
        session.set_expected(Some(Step::awaiting(first.field)));

        log_flow_transition(user_id, from, session.expected, category.map(|_| Field::Category));
        Outcome::new(session, vec![Reply::text(sections.join("\n\n"))])
    }

    fn handle_choice(&self, user_id: i64, session: Session, text: &str) -> Outcome {
        let profile = &*self.profile;
        let choice = match &profile.choice {
            Some(choice) => choice,
            None => return Outcome::new(Session::default(), vec![Reply::text(&profile.texts.idle)]),
        };

        match choice.option(text) {
            Some(option) => {
                info!(user_id = user_id, choice = %option.label, "Choice selected");
                log_flow_transition(user_id, Some(Step::AwaitChoice), None, None);
                let label = escape_html(&option.label);
                let confirmation = render_template(
                    &choice.confirmation,
                    &[("choice", label.as_str()), ("fun_fact", self.fun_fact())],
                );
                Outcome::new(
                    Session::default(),
                    vec![
                        Reply::text(confirmation),
                        menu::main_menu(profile, &profile.texts.menu),
                    ],
                )
            }
            None => {
                debug!(user_id = user_id, "Invalid choice input");
                Outcome::new(session, vec![Reply::text(&choice.invalid)])
            }
        }
    }

    async fn handle_answer(
        &self,
        user_id: i64,
        mut session: Session,
        field: Field,
        text: &str,
        submitter: &Submitter,
    ) -> Outcome {
        let profile = &*self.profile;
        session.record_answer(field, text);

        let transition = match next_after(&profile.question_fields(), field) {
            Some(transition) => transition,
            None => {
                warn!(user_id = user_id, field = %field, "Session expects a field the profile does not ask");
                return self.failure();
            }
        };

        match transition {
            Transition::Ask(next) => {
                let question = match profile.question(next) {
                    Some(question) => question,
                    None => return self.failure(),
                };

                let mut sections = Vec::new();
                if let Some(echo) = self.echo(field, text).await {
                    sections.push(echo);
                }
                sections.push(question.prompt.clone());

                let from = session.expected;
                session.set_expected(Some(Step::awaiting(next)));
                log_flow_transition(user_id, from, session.expected, Some(field));
                Outcome::new(session, vec![Reply::text(sections.join("\n\n"))])
            }
            Transition::Submit => self.submit(user_id, session, submitter).await,
        }
    }

    async fn submit(&self, user_id: i64, session: Session, submitter: &Submitter) -> Outcome {
        let profile = &*self.profile;

        let record = match SubmissionRecord::assemble(
            &session.answers,
            &profile.required_fields(),
            submitter,
            &profile.name,
            Utc::now(),
        ) {
            Ok(record) => record,
            Err(e) => {
                error!(user_id = user_id, error = %e, "Could not assemble submission");
                return self.failure();
            }
        };

        if let Err(e) = self.submissions.append(&record).await {
            log_submission(&record, false);
            error!(user_id = user_id, error = %e, "Failed to store submission");
            return self.failure();
        }
        log_submission(&record, true);
        log_flow_transition(user_id, session.expected, None, None);

        let summary = self.summary(&record, submitter).await;
        let name = escape_html(&submitter.first_name);
        let contacts = menu::closing_contacts(profile);
        let closing = render_template(
            &profile.texts.closing,
            &[
                ("name", name.as_str()),
                ("summary", summary.as_str()),
                ("contacts", contacts.as_str()),
                ("fun_fact", self.fun_fact()),
            ],
        );

        Outcome {
            session: Session::default(),
            replies: vec![
                Reply::text(closing),
                menu::main_menu(profile, &profile.texts.menu),
            ],
            submitted: Some(record),
        }
    }

    /// Re-send the prompt for the current step
    fn reprompt(&self, session: Session, step: Step) -> Outcome {
        let profile = &*self.profile;
        let reply = match step {
            Step::AwaitCategory => menu::category_menu(profile),
            Step::AwaitChoice => match &profile.choice {
                Some(choice) => Reply::text(&choice.invalid),
                None => Reply::text(&profile.texts.idle),
            },
            _ => match step.field().and_then(|f| profile.question(f)) {
                Some(question) => Reply::text(&question.prompt),
                None => Reply::text(&profile.texts.idle),
            },
        };
        Outcome::new(session, vec![reply])
    }

    /// Echo of an answer shown above the next prompt, already HTML
    async fn echo(&self, field: Field, text: &str) -> Option<String> {
        let echo = self.profile.question(field)?.echo.as_ref()?;
        let shown = match &echo.paraphrase {
            Some(request) => self.paraphrase_or_raw(request, &[("text", text)], text).await,
            None => escape_html(&truncate_text(text, MAX_SHOWN_ANSWER_CHARS)),
        };
        Some(render_template(&echo.template, &[("echo", shown.as_str())]))
    }

    /// Closing summary: paraphrased when configured, bullets otherwise
    async fn summary(&self, record: &SubmissionRecord, submitter: &Submitter) -> String {
        let profile = &*self.profile;
        let fields = profile.summary_fields();
        let bullets = fields
            .iter()
            .filter_map(|f| {
                record.field(*f).map(|value| {
                    format!("- {}: {}", f.label(), escape_html(&truncate_text(value, MAX_SHOWN_ANSWER_CHARS)))
                })
            })
            .collect::<Vec<_>>()
            .join("\n");

        let request = match (&profile.summary.paraphrase, &self.paraphraser) {
            (Some(request), Some(_)) => request,
            _ => return bullets,
        };

        let details = fields
            .iter()
            .filter_map(|f| record.field(*f).map(|value| format!("{}: {}", f.label(), value)))
            .collect::<Vec<_>>()
            .join("\n");
        let user_text = render_template(
            &request.request,
            &[("name", submitter.first_name.as_str()), ("details", details.as_str())],
        );

        match self.call_paraphraser(&request.instruction, &user_text).await {
            Some(summary) => escape_html(&summary),
            None => bullets,
        }
    }

    async fn paraphrase_or_raw(
        &self,
        request: &ParaphraseRequest,
        params: &[(&str, &str)],
        raw: &str,
    ) -> String {
        let user_text = render_template(&request.request, params);
        match self.call_paraphraser(&request.instruction, &user_text).await {
            Some(paraphrased) => escape_html(&paraphrased),
            None => escape_html(&truncate_text(raw, MAX_SHOWN_ANSWER_CHARS)),
        }
    }

    async fn call_paraphraser(&self, instruction: &str, text: &str) -> Option<String> {
        let paraphraser = self.paraphraser.as_ref()?;
        match paraphraser.paraphrase(instruction, text).await {
            Ok(output) => Some(truncate_text(&output, MAX_PARAPHRASE_CHARS)),
            Err(e) => {
                warn!(error = %e, "Paraphrase failed, using raw text");
                None
            }
        }
    }

    fn fun_fact(&self) -> &str {
        choose_random(&self.profile.fun_facts).unwrap_or("")
    }
}
