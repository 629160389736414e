//! End-to-end checks of the rate flow over the pure decision/state layer,
//! without touching the Telegram API.

use kurs_bot::bot::handlers::{classify_group_message, GroupReply};
use kurs_bot::bot::rate::extract_rate;
use kurs_bot::bot::state::RateState;
use kurs_bot::bot::views;

#[tokio::test]
async fn panel_change_rate_flow() {
    let state = RateState::new();
    let admin = 123_456_789;

    // "Изменить курс" pressed
    state.expect_rate_from(admin).await;
    assert!(state.is_awaiting_rate(admin).await);

    // A reply without a number leaves the awaiting set and rate untouched
    assert_eq!(extract_rate("не знаю"), None);
    assert!(state.is_awaiting_rate(admin).await);
    assert_eq!(state.current_rate().await, None);

    // A parseable reply stores the value and finishes the flow
    let value = extract_rate("94,5").expect("number expected");
    state.set_rate(value).await;
    state.clear_awaiting(admin).await;

    assert_eq!(state.current_rate().await, Some(94.5));
    assert!(!state.is_awaiting_rate(admin).await);
    assert_eq!(views::rate_updated(value), "Курс обновлён: 94.5");
}

#[tokio::test]
async fn group_one_shot_update_then_quote() {
    let state = RateState::new();

    // Before any update the group reply names the admin explicitly
    assert_eq!(
        views::group_rate_reply(state.current_rate().await),
        "Курс ещё не задан админом."
    );

    // Admin writes "курс 100" directly in the group, no panel involved
    match classify_group_message("курс 100", true) {
        GroupReply::UpdateRate(value) => state.set_rate(value).await,
        other => panic!("expected one-shot update, got {other:?}"),
    }
    assert_eq!(state.current_rate().await, Some(100.0));
    assert_eq!(views::rate_updated(100.0), "Курс обновлён: 100.0");

    // Any user asking afterwards gets the stored rate quoted
    assert_eq!(
        classify_group_message("какой курс?", false),
        GroupReply::QuoteRate
    );
    assert_eq!(
        views::group_rate_reply(state.current_rate().await),
        "Текущий курс: 100.0"
    );
}

#[tokio::test]
async fn non_admin_number_never_updates() {
    let state = RateState::new();
    state.set_rate(94.5).await;

    // A regular user writing the trigger word with a number is a quote,
    // not an update
    assert_eq!(
        classify_group_message("курс 100", false),
        GroupReply::QuoteRate
    );
    assert_eq!(state.current_rate().await, Some(94.5));
}
