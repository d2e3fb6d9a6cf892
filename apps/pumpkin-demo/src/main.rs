use std::rc::Rc;

use pumpkin_core::{LayoutStateManager, StateKind};
use pumpkin_views::{log_view_tree, Change, PropertyState, Size, View, Visibility};

const CARD_HEADER: i32 = 1;
const CARD_BODY: i32 = 2;
const CARD_FOOTER: i32 = 3;

const COLLAPSED: StateKind = StateKind::new("collapsed");
const EXPANDED: StateKind = StateKind::new("expanded");

fn card_screen() -> Rc<View> {
    View::root(
        "screen",
        vec![View::group(
            "card",
            None,
            vec![
                View::leaf("header", CARD_HEADER, Size::new(320.0, 48.0)),
                View::leaf("body", CARD_BODY, Size::new(320.0, 240.0)),
                View::leaf("footer", CARD_FOOTER, Size::new(320.0, 32.0)),
            ],
        )],
    )
}

fn main() {
    env_logger::init();

    let screen = card_screen();
    let manager = LayoutStateManager::setup_with(screen.clone())
        .add_state(
            PropertyState::new(COLLAPSED)
                .set(CARD_BODY, Change::Visibility(Visibility::Gone))
                .set(CARD_FOOTER, Change::Alpha(0.0))
                .set(CARD_HEADER, Change::TranslationY(-8.0)),
        )
        .add_state(
            PropertyState::new(EXPANDED)
                .set(CARD_BODY, Change::Visibility(Visibility::Visible))
                .set(CARD_FOOTER, Change::Alpha(1.0))
                .set(CARD_HEADER, Change::TranslationY(0.0)),
        )
        .build();

    // Start collapsed once the first layout pass has measured the card.
    manager.post_state(COLLAPSED);
    screen.perform_layout();
    screen.perform_layout();
    log_view_tree(&screen);

    manager.go(EXPANDED);
    screen.perform_layout();
    log_view_tree(&screen);

    manager.go_immediately(COLLAPSED);
    screen.perform_layout();
    log_view_tree(&screen);

    log::info!(
        "screen ran {} layout passes and {} transitions; final size {:?}",
        screen.layout_passes(),
        screen.transitions(),
        screen.measured_size()
    );
}
