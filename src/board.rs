use std::cell::Cell;
use std::rc::Rc;

use yew::Reducible;

use crate::api::ActivityApi;
use crate::model::Catalog;
use crate::notice::{Notice, NoticeKind, NoticeTiming};

const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
const UNREGISTER_FAILED: &str = "Failed to unregister. Please try again.";
const SIGNUP_INCOMPLETE: &str = "Please enter your email and choose an activity.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Rendered,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub email: String,
    pub activity: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    pub catalog: Catalog,
    pub load: LoadState,
    pub notice: Option<Notice>,
    pub form: SignupForm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    CatalogRequested,
    CatalogLoaded(Catalog),
    CatalogFailed,
    EmailChanged(String),
    ActivityChosen(String),
    ResetForm,
    ShowNotice(Notice),
    HideNotice(u64),
}

impl BoardState {
    pub fn apply(&mut self, action: BoardAction) {
        match action {
            BoardAction::CatalogRequested => self.load = LoadState::Loading,
            BoardAction::CatalogLoaded(catalog) => {
                self.catalog = catalog;
                self.load = LoadState::Rendered;
            }
            BoardAction::CatalogFailed => {
                self.catalog = Catalog::default();
                self.load = LoadState::Failed;
            }
            BoardAction::EmailChanged(email) => self.form.email = email,
            BoardAction::ActivityChosen(activity) => self.form.activity = activity,
            BoardAction::ResetForm => self.form = SignupForm::default(),
            BoardAction::ShowNotice(notice) => self.notice = Some(notice),
            BoardAction::HideNotice(id) => {
                // a newer notice owns the slot; its own timer will clear it
                if self.notice.as_ref().is_some_and(|n| n.id == id) {
                    self.notice = None;
                }
            }
        }
    }
}

impl Reducible for BoardState {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

/// One per page load. Owns the backend handle and reports every effect through `dispatch`.
pub struct ActivityBoard<A> {
    api: A,
    timing: NoticeTiming,
    next_notice: Cell<u64>,
}

impl<A: ActivityApi> ActivityBoard<A> {
    pub fn new(api: A, timing: NoticeTiming) -> Self {
        Self {
            api,
            timing,
            next_notice: Cell::new(0),
        }
    }

    /// Replace the catalog with the server's. Failures end up as an empty, failed board.
    pub async fn load_catalog(&self, dispatch: &dyn Fn(BoardAction)) {
        dispatch(BoardAction::CatalogRequested);
        match self.api.fetch_catalog().await {
            Ok(catalog) => {
                log::debug!("loaded {} activities", catalog.len());
                dispatch(BoardAction::CatalogLoaded(catalog));
            }
            Err(err) => {
                log::error!("Error fetching activities: {err}");
                dispatch(BoardAction::CatalogFailed);
            }
        }
    }

    pub async fn submit_signup(&self, email: &str, activity: &str, dispatch: &dyn Fn(BoardAction)) {
        let email = email.trim();
        if email.is_empty() || activity.is_empty() {
            dispatch(self.notice(SIGNUP_INCOMPLETE.to_string(), NoticeKind::Error, self.timing.signup_ms));
            return;
        }

        match self.api.signup(activity, email).await {
            Ok(message) => {
                log::info!("signed up {email} for {activity}");
                dispatch(self.notice(message, NoticeKind::Success, self.timing.signup_ms));
                dispatch(BoardAction::ResetForm);
                self.load_catalog(dispatch).await;
            }
            Err(err) => {
                log::error!("Error signing up: {err}");
                dispatch(self.notice(
                    err.notice_text(SIGNUP_FAILED),
                    NoticeKind::Error,
                    self.timing.signup_ms,
                ));
            }
        }
    }

    /// Nothing is sent unless `confirm` says yes.
    pub async fn submit_unregister(
        &self,
        activity: &str,
        email: &str,
        confirm: impl FnOnce(&str) -> bool,
        dispatch: &dyn Fn(BoardAction),
    ) {
        if !confirm(&format!("Unregister {email} from {activity}?")) {
            log::debug!("unregister of {email} from {activity} cancelled");
            return;
        }

        match self.api.unregister(activity, email).await {
            Ok(message) => {
                log::info!("unregistered {email} from {activity}");
                dispatch(self.notice(message, NoticeKind::Success, self.timing.unregister_ms));
                self.load_catalog(dispatch).await;
            }
            Err(err) => {
                log::error!("Error unregistering: {err}");
                dispatch(self.notice(
                    err.notice_text(UNREGISTER_FAILED),
                    NoticeKind::Error,
                    self.timing.unregister_ms,
                ));
            }
        }
    }

    fn notice(&self, text: String, kind: NoticeKind, ttl_ms: u32) -> BoardAction {
        let id = self.next_notice.get() + 1;
        self.next_notice.set(id);
        BoardAction::ShowNotice(Notice {
            id,
            text,
            kind,
            ttl_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BoardError, Result};
    use crate::layout::select_options;
    use crate::model::Activity;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct FakeApi {
        catalog: RefCell<Result<Catalog>>,
        reply: Result<String>,
        fetches: Cell<usize>,
        signups: Cell<usize>,
        unregisters: Cell<usize>,
    }

    impl FakeApi {
        fn new(catalog: Result<Catalog>, reply: Result<String>) -> Self {
            Self {
                catalog: RefCell::new(catalog),
                reply,
                fetches: Cell::new(0),
                signups: Cell::new(0),
                unregisters: Cell::new(0),
            }
        }
    }

    impl ActivityApi for FakeApi {
        async fn fetch_catalog(&self) -> Result<Catalog> {
            self.fetches.set(self.fetches.get() + 1);
            self.catalog.borrow().clone()
        }

        async fn signup(&self, _activity: &str, _email: &str) -> Result<String> {
            self.signups.set(self.signups.get() + 1);
            self.reply.clone()
        }

        async fn unregister(&self, _activity: &str, _email: &str) -> Result<String> {
            self.unregisters.set(self.unregisters.get() + 1);
            self.reply.clone()
        }
    }

    fn chess(participants: &[&str]) -> Catalog {
        [Activity {
            name: "Chess Club".into(),
            description: "Learn strategies".into(),
            schedule: "Fridays".into(),
            max_participants: 10,
            participants: participants.iter().map(|p| p.to_string()).collect(),
        }]
        .into_iter()
        .collect()
    }

    fn filled_form() -> BoardState {
        let mut state = BoardState::default();
        state.apply(BoardAction::EmailChanged("b@x.com".into()));
        state.apply(BoardAction::ActivityChosen("Chess Club".into()));
        state
    }

    #[test]
    fn load_replaces_catalog() {
        let board = ActivityBoard::new(FakeApi::new(Ok(chess(&["a@x.com"])), Ok(String::new())), NoticeTiming::default());
        let state = RefCell::new(BoardState::default());

        block_on(board.load_catalog(&|a| state.borrow_mut().apply(a)));

        let state = state.into_inner();
        assert_eq!(state.load, LoadState::Rendered);
        assert_eq!(state.catalog.get("Chess Club").unwrap().spots_left(), 9);
        assert_eq!(board.api.fetches.get(), 1);
    }

    #[test]
    fn failed_load_leaves_only_placeholder_option() {
        let down = Err(BoardError::Network {
            url: "/activities".into(),
            reason: "offline".into(),
        });
        let board = ActivityBoard::new(FakeApi::new(down, Ok(String::new())), NoticeTiming::default());
        let state = RefCell::new(BoardState::default());
        state.borrow_mut().apply(BoardAction::CatalogLoaded(chess(&[])));

        block_on(board.load_catalog(&|a| state.borrow_mut().apply(a)));

        let state = state.into_inner();
        assert_eq!(state.load, LoadState::Failed);
        assert!(state.catalog.is_empty());
        assert_eq!(select_options(&state.catalog).len(), 1);
    }

    #[test]
    fn successful_signup_refetches_and_resets_form() {
        let board = ActivityBoard::new(
            FakeApi::new(
                Ok(chess(&["a@x.com", "b@x.com"])),
                Ok("Signed up b@x.com for Chess Club".into()),
            ),
            NoticeTiming::default(),
        );
        let state = RefCell::new(filled_form());

        block_on(board.submit_signup("b@x.com", "Chess Club", &|a| state.borrow_mut().apply(a)));

        let state = state.into_inner();
        assert_eq!(board.api.signups.get() + board.api.fetches.get(), 2);
        assert_eq!(state.form, SignupForm::default());
        assert_eq!(state.catalog.get("Chess Club").unwrap().spots_left(), 8);

        let notice = state.notice.unwrap();
        assert_eq!(notice.text, "Signed up b@x.com for Chess Club");
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.ttl_ms, 5000);
    }

    #[test]
    fn rejected_signup_shows_detail_and_keeps_form() {
        let rejected = Err(BoardError::Server {
            status: 400,
            detail: Some("Already signed up".into()),
        });
        let board = ActivityBoard::new(FakeApi::new(Ok(chess(&[])), rejected), NoticeTiming::default());
        let state = RefCell::new(filled_form());

        block_on(board.submit_signup("b@x.com", "Chess Club", &|a| state.borrow_mut().apply(a)));

        let state = state.into_inner();
        let notice = state.notice.unwrap();
        assert_eq!(notice.text, "Already signed up");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(state.form.email, "b@x.com");
        assert_eq!(state.form.activity, "Chess Club");
        assert_eq!(board.api.fetches.get(), 0);
    }

    #[test]
    fn signup_network_failure_uses_generic_text() {
        let offline = Err(BoardError::Network {
            url: "/activities/Chess%20Club/signup".into(),
            reason: "offline".into(),
        });
        let board = ActivityBoard::new(FakeApi::new(Ok(chess(&[])), offline), NoticeTiming::default());
        let state = RefCell::new(filled_form());

        block_on(board.submit_signup("b@x.com", "Chess Club", &|a| state.borrow_mut().apply(a)));

        assert_eq!(state.into_inner().notice.unwrap().text, SIGNUP_FAILED);
    }

    #[test]
    fn incomplete_signup_sends_nothing() {
        let board = ActivityBoard::new(FakeApi::new(Ok(chess(&[])), Ok(String::new())), NoticeTiming::default());
        let state = RefCell::new(BoardState::default());

        block_on(board.submit_signup("   ", "Chess Club", &|a| state.borrow_mut().apply(a)));
        block_on(board.submit_signup("b@x.com", "", &|a| state.borrow_mut().apply(a)));

        assert_eq!(board.api.signups.get(), 0);
        assert_eq!(state.into_inner().notice.unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn declined_unregister_sends_nothing() {
        let board = ActivityBoard::new(FakeApi::new(Ok(chess(&["a@x.com"])), Ok(String::new())), NoticeTiming::default());
        let state = RefCell::new(BoardState::default());
        let asked = Cell::new(None::<String>);

        block_on(board.submit_unregister(
            "Chess Club",
            "a@x.com",
            |prompt| {
                asked.set(Some(prompt.to_string()));
                false
            },
            &|a| state.borrow_mut().apply(a),
        ));

        assert_eq!(asked.take().as_deref(), Some("Unregister a@x.com from Chess Club?"));
        assert_eq!(board.api.unregisters.get() + board.api.fetches.get(), 0);
        assert_eq!(state.into_inner(), BoardState::default());
    }

    #[test]
    fn confirmed_unregister_refetches() {
        let board = ActivityBoard::new(
            FakeApi::new(Ok(chess(&[])), Ok("Unregistered a@x.com from Chess Club".into())),
            NoticeTiming::default(),
        );
        let state = RefCell::new(BoardState::default());
        state.borrow_mut().apply(BoardAction::CatalogLoaded(chess(&["a@x.com"])));

        block_on(board.submit_unregister("Chess Club", "a@x.com", |_| true, &|a| state.borrow_mut().apply(a)));

        let state = state.into_inner();
        assert_eq!(board.api.unregisters.get(), 1);
        assert_eq!(board.api.fetches.get(), 1);
        assert!(state.catalog.get("Chess Club").unwrap().participants.is_empty());

        let notice = state.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.ttl_ms, 4000);
    }

    #[test]
    fn failed_unregister_shows_error() {
        let missing = Err(BoardError::Server {
            status: 404,
            detail: None,
        });
        let board = ActivityBoard::new(FakeApi::new(Ok(chess(&[])), missing), NoticeTiming::default());
        let state = RefCell::new(BoardState::default());

        block_on(board.submit_unregister("Chess Club", "a@x.com", |_| true, &|a| state.borrow_mut().apply(a)));

        let notice = state.into_inner().notice.unwrap();
        assert_eq!(notice.text, "An error occurred");
        assert_eq!(board.api.fetches.get(), 0);
    }

    #[test]
    fn stale_hide_keeps_newer_notice() {
        let board = ActivityBoard::new(FakeApi::new(Ok(chess(&[])), Ok(String::new())), NoticeTiming::default());
        let mut state = BoardState::default();

        state.apply(board.notice("first".into(), NoticeKind::Success, 10));
        state.apply(board.notice("second".into(), NoticeKind::Error, 10));
        state.apply(BoardAction::HideNotice(1));
        assert_eq!(state.notice.as_ref().unwrap().text, "second");

        state.apply(BoardAction::HideNotice(2));
        assert!(state.notice.is_none());
    }

    #[test]
    fn reducer_wraps_apply() {
        let state = Rc::new(BoardState::default());
        let next = state.reduce(BoardAction::CatalogRequested);
        assert_eq!(next.load, LoadState::Loading);
    }
}
