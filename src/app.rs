//! Main application UI and state management.
//! Handles deck and card management, study sessions, statistics and backups.

use chrono::{Local, TimeZone};
use eframe::egui;
use log::{error, info};
use srs_flashcards::database::Repository;
use srs_flashcards::export::json::{export_to_path, import_from_path};
use srs_flashcards::models::sm2::is_due;
use srs_flashcards::models::stats::{deck_stats, overall_stats};
use srs_flashcards::{Card, Collection, Quality, StudySession, now_millis};

/// Application screen states
#[derive(Default)]
enum AppScreen {
    #[default]
    Decks,
    Study,
    Stats,
}

/// Card being edited in place on the deck screen
struct CardDraft {
    id: String,
    front: String,
    back: String,
}

/// Clicks collected while rendering, applied once the frame is drawn
enum DeckAction {
    AddDeck,
    SelectDeck(String),
    DeleteDeck(String),
    Study(Option<String>),
    AddCard(String),
    EditCard(String),
    SaveEdit,
    CancelEdit,
    DeleteCard(String),
    ShowStats,
    Export,
    Import,
}

/// Main application state
pub struct MyApp {
    collection: Collection,
    repository: Box<dyn Repository>,
    current_screen: AppScreen,
    selected_deck_id: Option<String>,

    new_deck_name: String,
    new_deck_description: String,
    current_front: String,
    current_back: String,
    editing_card: Option<CardDraft>,

    study_session: Option<StudySession>,

    show_confirmation_dialog: bool,
    allowed_to_close: bool,
    show_result_dialog: bool,
    result_message: String,
}

/// Formats epoch milliseconds as a local YYYY-MM-DD string
fn format_date(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn card_status(card: &Card, now: i64) -> String {
    if card.is_new() {
        "New".to_string()
    } else if is_due(card, now) {
        format!("Due now (interval {} d)", card.interval)
    } else {
        format!(
            "Next review {} (interval {} d)",
            format_date(card.next_review_date),
            card.interval
        )
    }
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.current_screen {
            AppScreen::Decks => self.render_deck_screen(ctx),
            AppScreen::Study => self.render_study_screen(ctx),
            AppScreen::Stats => self.render_stats_screen(ctx),
        }

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) && !self.allowed_to_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.show_confirmation_dialog = true;
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Do you want to quit?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = false;
                        }

                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }

        if self.show_result_dialog {
            egui::Window::new("Import/Export Result")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.result_message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_result_dialog = false;
                    }
                });
        }
    }
}

impl MyApp {
    /// Creates a new application instance over an already loaded collection
    pub fn new(collection: Collection, repository: Box<dyn Repository>) -> Self {
        let selected_deck_id = collection.decks.first().map(|d| d.id.clone());
        Self {
            collection,
            repository,
            current_screen: AppScreen::Decks,
            selected_deck_id,
            new_deck_name: String::new(),
            new_deck_description: String::new(),
            current_front: String::new(),
            current_back: String::new(),
            editing_card: None,
            study_session: None,
            show_confirmation_dialog: false,
            allowed_to_close: false,
            show_result_dialog: false,
            result_message: String::new(),
        }
    }

    fn show_message(&mut self, message: String) {
        self.result_message = message;
        self.show_result_dialog = true;
    }

    /// Writes the collection back after every change
    fn persist(&mut self) {
        if let Err(e) = self.repository.save(&self.collection) {
            error!("Failed to save collection: {}", e);
            self.show_message(format!("Saving failed: {}", e));
        }
    }

    /// Renders the deck screen with deck and card management
    fn render_deck_screen(&mut self, ctx: &egui::Context) {
        let now = now_millis();
        let mut action: Option<DeckAction> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format_date(now));
                if ui.button("Statistics").clicked() {
                    action = Some(DeckAction::ShowStats);
                }
                if ui.button("Study All").clicked() {
                    action = Some(DeckAction::Study(None));
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Export Backup").clicked() {
                    action = Some(DeckAction::Export);
                }
                if ui.button("Import Backup").clicked() {
                    action = Some(DeckAction::Import);
                }
            });
            ui.separator();

            ui.heading("Create New Deck");
            ui.horizontal(|ui| {
                ui.label("Name:");
                ui.text_edit_singleline(&mut self.new_deck_name);
            });
            ui.horizontal(|ui| {
                ui.label("Description:");
                ui.text_edit_singleline(&mut self.new_deck_description);
            });
            if ui.button("Create Deck").clicked() && !self.new_deck_name.trim().is_empty() {
                action = Some(DeckAction::AddDeck);
            }

            ui.separator();
            ui.heading(format!("Decks ({})", self.collection.decks.len()));

            egui::ScrollArea::vertical()
                .id_source("decks_list")
                .max_height(180.0)
                .show(ui, |ui| {
                    for deck in &self.collection.decks {
                        let is_selected = self.selected_deck_id.as_deref() == Some(deck.id.as_str());
                        let stats = deck_stats(&self.collection, &deck.id, now);

                        ui.horizontal(|ui| {
                            if ui
                                .selectable_label(
                                    is_selected,
                                    format!(
                                        "{} ({} cards, {} due, {} new)",
                                        deck.name, stats.total, stats.due, stats.new
                                    ),
                                )
                                .clicked()
                            {
                                action = Some(DeckAction::SelectDeck(deck.id.clone()));
                            }
                            if ui.button("Study").clicked() {
                                action = Some(DeckAction::Study(Some(deck.id.clone())));
                            }
                            if ui.button("Delete").clicked() {
                                action = Some(DeckAction::DeleteDeck(deck.id.clone()));
                            }
                        });
                    }
                });

            ui.separator();

            let Some(deck) = self
                .selected_deck_id
                .as_deref()
                .and_then(|id| self.collection.deck(id))
            else {
                ui.label("Select a deck to add cards");
                return;
            };

            ui.heading(format!("Selected Deck: {}", deck.name));
            if !deck.description.is_empty() {
                ui.label(&deck.description);
            }

            ui.horizontal(|ui| {
                ui.label("Front:");
                ui.text_edit_singleline(&mut self.current_front);
            });
            ui.horizontal(|ui| {
                ui.label("Back:");
                ui.text_edit_singleline(&mut self.current_back);
            });
            if ui.button("Add Card").clicked()
                && !self.current_front.trim().is_empty()
                && !self.current_back.trim().is_empty()
            {
                action = Some(DeckAction::AddCard(deck.id.clone()));
            }

            ui.separator();

            let cards = self.collection.cards_for_deck(&deck.id);
            ui.heading(format!("Cards ({})", cards.len()));

            egui::ScrollArea::vertical()
                .id_source("cards_list")
                .show(ui, |ui| {
                    for card in cards {
                        ui.group(|ui| match &mut self.editing_card {
                            Some(draft) if draft.id == card.id => {
                                ui.horizontal(|ui| {
                                    ui.label("Front:");
                                    ui.text_edit_singleline(&mut draft.front);
                                });
                                ui.horizontal(|ui| {
                                    ui.label("Back:");
                                    ui.text_edit_singleline(&mut draft.back);
                                });
                                ui.horizontal(|ui| {
                                    if ui.button("Save").clicked() {
                                        action = Some(DeckAction::SaveEdit);
                                    }
                                    if ui.button("Cancel").clicked() {
                                        action = Some(DeckAction::CancelEdit);
                                    }
                                });
                            }
                            _ => {
                                ui.label(format!("Front: {}", card.front));
                                ui.label(format!("Back: {}", card.back));
                                ui.small(card_status(card, now));
                                ui.horizontal(|ui| {
                                    if ui.button("Edit").clicked() {
                                        action = Some(DeckAction::EditCard(card.id.clone()));
                                    }
                                    if ui.button("Delete").clicked() {
                                        action = Some(DeckAction::DeleteCard(card.id.clone()));
                                    }
                                });
                            }
                        });
                    }
                });
        });

        if let Some(action) = action {
            self.apply_deck_action(action, now);
        }
    }

    fn apply_deck_action(&mut self, action: DeckAction, now: i64) {
        match action {
            DeckAction::AddDeck => {
                let id = self
                    .collection
                    .add_deck(
                        self.new_deck_name.trim(),
                        self.new_deck_description.trim(),
                        now,
                    )
                    .id
                    .clone();
                self.selected_deck_id = Some(id);
                self.new_deck_name.clear();
                self.new_deck_description.clear();
                self.persist();
            }
            DeckAction::SelectDeck(id) => {
                self.selected_deck_id = Some(id);
                self.editing_card = None;
            }
            DeckAction::DeleteDeck(id) => {
                if let Err(e) = self.collection.delete_deck(&id) {
                    error!("Failed to delete deck: {}", e);
                    return;
                }
                if self.selected_deck_id.as_deref() == Some(id.as_str()) {
                    self.selected_deck_id = None;
                }
                self.persist();
            }
            DeckAction::Study(deck_id) => self.start_study_session(deck_id, now),
            DeckAction::AddCard(deck_id) => {
                let added = self.collection.add_card(
                    &deck_id,
                    self.current_front.trim(),
                    self.current_back.trim(),
                    now,
                );
                if let Err(e) = added {
                    error!("Failed to add card: {}", e);
                    return;
                }
                self.current_front.clear();
                self.current_back.clear();
                self.persist();
            }
            DeckAction::EditCard(id) => {
                self.editing_card = self.collection.card(&id).map(|card| CardDraft {
                    id: card.id.clone(),
                    front: card.front.clone(),
                    back: card.back.clone(),
                });
            }
            DeckAction::SaveEdit => {
                if let Some(draft) = self.editing_card.take() {
                    let updated = self.collection.update_card(
                        &draft.id,
                        Some(draft.front.trim()),
                        Some(draft.back.trim()),
                        now,
                    );
                    match updated {
                        Ok(()) => self.persist(),
                        Err(e) => error!("Failed to update card: {}", e),
                    }
                }
            }
            DeckAction::CancelEdit => self.editing_card = None,
            DeckAction::DeleteCard(id) => {
                if let Err(e) = self.collection.delete_card(&id) {
                    error!("Failed to delete card: {}", e);
                    return;
                }
                self.persist();
            }
            DeckAction::ShowStats => self.current_screen = AppScreen::Stats,
            DeckAction::Export => self.handle_export(),
            DeckAction::Import => self.handle_import(),
        }
    }

    /// Renders the study screen with the card and the six quality buttons
    fn render_study_screen(&mut self, ctx: &egui::Context) {
        let mut action_reveal = false;
        let mut action_grade: Option<Quality> = None;
        let mut action_back = false;

        if let Some(session) = &mut self.study_session {
            session.retain_existing(&self.collection);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = &self.study_session else {
                action_back = true;
                return;
            };

            let title = session
                .deck_id
                .as_deref()
                .and_then(|id| self.collection.deck(id))
                .map_or("All decks", |deck| deck.name.as_str());
            ui.heading(format!("Studying: {}", title));
            ui.label(format!(
                "{} / {} reviewed",
                session.reviewed_count(),
                session.total_count()
            ));
            ui.add(egui::ProgressBar::new(session.progress()).show_percentage());

            ui.add_space(20.0);

            let Some(card) = session.current_card(&self.collection) else {
                ui.heading("Review Complete!");
                ui.label(format!(
                    "You have reviewed {} card(s) in this session.",
                    session.reviewed_count()
                ));
                ui.add_space(20.0);
                if ui.button("Back to Decks").clicked() {
                    action_back = true;
                }
                return;
            };

            ui.group(|ui| {
                ui.set_min_height(200.0);
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.heading("Question:");
                    ui.label(&card.front);
                    ui.add_space(20.0);

                    if session.show_answer {
                        ui.heading("Answer:");
                        ui.label(&card.back);
                    } else {
                        ui.label("(Click 'Show Answer' to reveal)");
                    }
                    ui.add_space(20.0);
                });
            });

            ui.label(if card.is_new() {
                "New card".to_string()
            } else {
                format!("Current interval: {} day(s)", card.interval)
            });

            ui.add_space(20.0);

            if !session.show_answer {
                if ui.button("Show Answer").clicked() {
                    action_reveal = true;
                }
            } else {
                ui.label("How well did you remember?");
                for row in Quality::ALL.chunks(3) {
                    ui.horizontal(|ui| {
                        for &quality in row {
                            if ui
                                .button(format!("{} - {}", quality.value(), quality.label()))
                                .clicked()
                            {
                                action_grade = Some(quality);
                            }
                        }
                    });
                }
            }

            ui.add_space(20.0);

            if ui.button("End Session").clicked() {
                action_back = true;
            }
        });

        // Execute deferred actions
        if action_reveal {
            if let Some(session) = &mut self.study_session {
                session.reveal_answer();
            }
        }
        if let Some(quality) = action_grade {
            self.grade_current_card(quality);
        }
        if action_back {
            self.current_screen = AppScreen::Decks;
            self.study_session = None;
        }
    }

    fn grade_current_card(&mut self, quality: Quality) {
        let Some(session) = &mut self.study_session else {
            return;
        };

        match session.grade(&mut self.collection, quality, now_millis()) {
            Ok(_) => self.persist(),
            Err(e) => error!("Failed to grade card: {}", e),
        }
    }

    /// Starts a study session over due and new cards
    fn start_study_session(&mut self, deck_id: Option<String>, now: i64) {
        let session = StudySession::new(&self.collection, deck_id.as_deref(), now);

        if session.is_complete() {
            self.show_message("Nothing to study right now. Come back later!".to_string());
            return;
        }

        info!("Starting study session with {} cards", session.total_count());
        self.study_session = Some(session);
        self.current_screen = AppScreen::Study;
    }

    /// Renders the statistics screen
    fn render_stats_screen(&mut self, ctx: &egui::Context) {
        let stats = overall_stats(&self.collection, now_millis());
        let mut action_back = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Statistics");
            ui.add_space(10.0);

            egui::Grid::new("stats_grid")
                .striped(true)
                .num_columns(2)
                .show(ui, |ui| {
                    let rows = [
                        ("Total Decks", stats.total_decks.to_string()),
                        ("Total Cards", stats.total_cards.to_string()),
                        ("Cards Due Today", stats.due_cards.to_string()),
                        ("New Cards", stats.new_cards.to_string()),
                        ("Total Reviews", stats.total_reviews.to_string()),
                        ("Reviews Today", stats.reviews_today.to_string()),
                        ("Day Streak", stats.streak.to_string()),
                        ("Avg. Ease Factor", format!("{:.2}", stats.avg_ease_factor)),
                    ];
                    for (label, value) in rows {
                        ui.label(label);
                        ui.strong(value);
                        ui.end_row();
                    }
                });

            ui.separator();
            ui.heading("Rating Guide");
            for quality in Quality::ALL {
                ui.label(format!("{} - {}", quality.value(), quality.label()));
            }
            ui.label("Ratings of 3 and above count as a successful recall.");

            ui.separator();
            ui.heading("Ease Factor");
            ui.label(
                "The ease factor determines how quickly the interval between reviews grows. \
                 Cards you find easier get a higher ease factor and are shown less often. \
                 The minimum ease factor is 1.3.",
            );

            ui.add_space(20.0);
            if ui.button("Back to Decks").clicked() {
                action_back = true;
            }
        });

        if action_back {
            self.current_screen = AppScreen::Decks;
        }
    }

    /// Handles collection export to a JSON file
    fn handle_export(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("flashcards-backup-{}.json", format_date(now_millis())))
            .add_filter("JSON files", &["json"])
            .save_file()
        else {
            return;
        };

        match export_to_path(&self.collection, &path) {
            Ok(()) => self.show_message(format!(
                "Exported {} decks and {} cards.",
                self.collection.decks.len(),
                self.collection.cards.len()
            )),
            Err(e) => {
                error!("Export failed: {}", e);
                self.show_message(format!("Export failed: {}", e));
            }
        }
    }

    /// Handles collection import from a JSON file; replaces current data only on success
    fn handle_import(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        else {
            return;
        };

        match import_from_path(&path) {
            Ok(collection) => {
                self.collection = collection;
                self.selected_deck_id = self.collection.decks.first().map(|d| d.id.clone());
                self.editing_card = None;
                self.study_session = None;
                self.persist();
                self.show_message(format!(
                    "Imported {} decks, {} cards and {} reviews.",
                    self.collection.decks.len(),
                    self.collection.cards.len(),
                    self.collection.review_history.len()
                ));
            }
            Err(e) => {
                self.show_message(format!(
                    "Import failed: {}\n\nThe file must contain \"decks\", \"cards\" and \"reviewHistory\" arrays.",
                    e
                ));
            }
        }
    }
}
