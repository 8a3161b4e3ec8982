//! End-to-end container flows over an in-memory database.

use wird_app::config::DEFAULT_API_BASE_URL;
use wird_app::{App, AppConfig, SqliteBackend};
use wird_engine::memorize::MemorizeOutcome;

fn in_memory_app() -> App {
    let config = AppConfig {
        data_dir: std::path::PathBuf::from("."),
        api_base_url: DEFAULT_API_BASE_URL.to_string(),
        log_level: "warn".to_string(),
    };
    let backend = SqliteBackend::in_memory().expect("in-memory backend");
    App::with_backend(backend, &config)
}

#[test]
fn challenge_completion_awards_points_once() {
    let mut app = in_memory_app();
    assert!(app.user_mut().complete_challenge(3));
    assert!(!app.user_mut().complete_challenge(3));

    let progress = app.user().progress();
    assert_eq!(progress.points, 20);
    assert_eq!(progress.completed_challenges, vec![3]);
}

#[test]
fn memorizing_al_fatiha_end_to_end() {
    let mut app = in_memory_app();

    for verse in 1..=6 {
        assert!(matches!(
            app.user_mut().mark_verse_memorized(1, verse),
            MemorizeOutcome::Recorded { .. }
        ));
    }
    assert_eq!(
        app.user_mut().mark_verse_memorized(1, 7),
        MemorizeOutcome::SurahCompleted
    );

    let progress = app.user().progress();
    // 7 verse points + 100 surah completion bonus.
    assert_eq!(progress.points, 107);
    assert_eq!(progress.memorized_surahs, vec![1]);
}

#[test]
fn selected_reciter_drives_playback_urls() {
    let mut app = in_memory_app();

    app.play_surah_audio(1);
    assert!(app.audio().is_playing());
    assert_eq!(
        app.audio().current_track(),
        Some("https://server11.mp3quran.net/yasser/001.mp3")
    );

    app.pause_audio();
    assert!(!app.audio().is_playing());

    app.user_mut().set_reciter("1");
    app.play_surah_audio(2);
    assert_eq!(
        app.audio().current_track(),
        Some("https://server7.mp3quran.net/basit/002.mp3")
    );

    app.stop_audio();
    assert_eq!(app.audio().current_track(), None);
}

#[test]
fn scope_switch_carries_guest_data_once() {
    let mut app = in_memory_app();
    app.user_mut().add_points(120);
    app.user_mut().set_font_size(30);

    app.switch_scope("profile-1");
    // Guest data migrated into the empty profile scope.
    assert_eq!(app.user().progress().points, 120);
    assert_eq!(app.user().settings().font_size, 30);

    // Changes under the profile stay under the profile.
    app.user_mut().add_points(30);
    app.switch_scope("guest");
    assert_eq!(app.user().progress().points, 120);

    // And the profile still holds its own total.
    app.switch_scope("profile-1");
    assert_eq!(app.user().progress().points, 150);
}

#[test]
fn reading_session_feeds_streak_and_history() {
    let mut app = in_memory_app();
    app.user_mut().add_reading_history(18, 15);

    let progress = app.user().progress();
    assert_eq!(progress.total_read, 15);
    assert_eq!(progress.streak, 1);
    assert_eq!(progress.reading_history.len(), 1);
    assert!(!progress.last_read.is_empty());
}

#[tokio::test]
async fn invalid_catalog_requests_fail_fast() {
    let mut app = in_memory_app();
    assert!(app.surah_verses(0).await.is_err());
    assert!(app.hizb_surah_numbers(0).await.is_err());
}
