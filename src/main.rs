mod app;
use srs_flashcards::*;

use app::MyApp;
use config::Config;
use database::{Repository, SqliteRepository, load_or_default};
use log::info;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let repository = match SqliteRepository::open(&config.database_path) {
        Ok(repository) => repository,
        Err(e) => {
            log::error!(
                "Failed to open database '{}': {}",
                config.database_path.display(),
                e
            );
            std::process::exit(1);
        }
    };

    let mut collection = load_or_default(&repository);

    if collection.decks.is_empty() {
        let now = now_millis();
        let deck_id = collection.add_deck("Polish Vocabulary", "", now).id.clone();
        for (front, back) in [("cześć", "hello"), ("dziękuję", "thank you"), ("proszę", "please")] {
            if let Err(e) = collection.add_card(&deck_id, front, back, now) {
                log::warn!("Failed to add sample card '{}': {}", front, e);
            }
        }
        match repository.save(&collection) {
            Ok(()) => info!("Sample data created"),
            Err(e) => log::warn!("Failed to save sample data: {}", e),
        }
    }

    info!(
        "Loaded {} decks and {} cards from '{}'",
        collection.decks.len(),
        collection.cards.len(),
        config.database_path.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height]),
        ..Default::default()
    };
    eframe::run_native(
        config.window_title,
        options,
        Box::new(|_cc| Ok(Box::new(MyApp::new(collection, Box::new(repository))))),
    )
}
