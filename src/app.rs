use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::HttpApi;
use crate::board::{ActivityBoard, BoardAction, BoardState, LoadState};
use crate::layout::{availability_text, select_options, CardLayout};
use crate::model::{Activity, Catalog};
use crate::notice::Notice;

#[derive(Properties)]
pub struct AppProps {
    pub board: Rc<ActivityBoard<HttpApi>>,
    pub layout: CardLayout,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.board, &other.board) && self.layout == other.layout
    }
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let state = use_reducer(BoardState::default);

    // Load the catalog once on mount
    {
        let board = props.board.clone();
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let dispatch = move |action: BoardAction| dispatcher.dispatch(action);
                board.load_catalog(&dispatch).await;
            });
            || ()
        });
    }

    // Auto-hide: a replaced notice drops (and so cancels) the previous timer
    {
        let dispatcher = state.dispatcher();
        use_effect_with(state.notice.clone(), move |notice| {
            let timer = notice.as_ref().map(|n| {
                let id = n.id;
                Timeout::new(n.ttl_ms, move || {
                    dispatcher.dispatch(BoardAction::HideNotice(id))
                })
            });
            move || drop(timer)
        });
    }

    let on_email = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(BoardAction::EmailChanged(input.value()));
        })
    };

    let on_activity = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: Event| {
            let Some(sel) = e.target_dyn_into::<HtmlSelectElement>() else { return; };
            dispatcher.dispatch(BoardAction::ActivityChosen(sel.value()));
        })
    };

    let on_submit = {
        let board = props.board.clone();
        let dispatcher = state.dispatcher();
        let form = state.form.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let board = board.clone();
            let dispatcher = dispatcher.clone();
            let form = form.clone();
            spawn_local(async move {
                let dispatch = move |action: BoardAction| dispatcher.dispatch(action);
                board
                    .submit_signup(&form.email, &form.activity, &dispatch)
                    .await;
            });
        })
    };

    let on_unregister = {
        let board = props.board.clone();
        let dispatcher = state.dispatcher();
        Callback::from(move |(activity, email): (String, String)| {
            let board = board.clone();
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                let dispatch = move |action: BoardAction| dispatcher.dispatch(action);
                board
                    .submit_unregister(&activity, &email, gloo::dialogs::confirm, &dispatch)
                    .await;
            });
        })
    };

    let chosen = state.form.activity.clone();

    html! {
        <main class="board">
          <section id="activities-container">
            <h3>{ "Available Activities" }</h3>
            <ActivityList
              catalog={state.catalog.clone()}
              load={state.load}
              layout={props.layout}
              on_unregister={on_unregister}
            />
          </section>

          <section id="signup-container">
            <h3>{ "Sign Up for an Activity" }</h3>
            <form id="signup-form" onsubmit={on_submit}>
              <div class="form-group">
                <label for="email">{ "Student Email:" }</label>
                <input
                  type="email"
                  id="email"
                  required={true}
                  placeholder="you@example.com"
                  value={state.form.email.clone()}
                  oninput={on_email}
                />
              </div>
              <div class="form-group">
                <label for="activity">{ "Select Activity:" }</label>
                <select id="activity" required={true} onchange={on_activity}>
                  { for select_options(&state.catalog).into_iter().map(|o| {
                      let selected = o.value == chosen;
                      html!{ <option key={o.value.clone()} value={o.value} selected={selected}>{ o.label }</option> }
                  })}
                </select>
              </div>
              <button type="submit">{ "Sign Up" }</button>
            </form>
            <NoticeBanner notice={state.notice.clone()} />
          </section>
        </main>
    }
}

#[derive(Properties, PartialEq)]
struct ActivityListProps {
    catalog: Catalog,
    load: LoadState,
    layout: CardLayout,
    on_unregister: Callback<(String, String)>,
}

#[function_component(ActivityList)]
fn activity_list(props: &ActivityListProps) -> Html {
    let body = match props.load {
        LoadState::Failed => html! {
            <p>{ "Failed to load activities. Please try again later." }</p>
        },
        LoadState::Idle | LoadState::Loading if props.catalog.is_empty() => html! {
            <p>{ "Loading activities..." }</p>
        },
        _ => html! {
            { for props.catalog.iter().map(|a| match props.layout {
                CardLayout::Template => html! {
                    <ActivityCard
                      key={a.name.clone()}
                      activity={a.clone()}
                      on_unregister={props.on_unregister.clone()}
                    />
                },
                CardLayout::Minimal => html! {
                    <MinimalCard key={a.name.clone()} activity={a.clone()} />
                },
            })}
        },
    };

    html! { <div id="activities-list">{ body }</div> }
}

#[derive(Properties, PartialEq)]
struct CardProps {
    activity: Activity,
    #[prop_or_default]
    on_unregister: Callback<(String, String)>,
}

#[function_component(ActivityCard)]
fn activity_card(props: &CardProps) -> Html {
    let activity = &props.activity;

    html! {
        <div class="activity-card">
          <h4 class="activity-title">{ activity.name.clone() }</h4>
          <p class="activity-desc">{ activity.description.clone() }</p>
          <p class="activity-schedule"><strong>{ "Schedule:" }</strong>{ format!(" {}", activity.schedule) }</p>
          <p><strong>{ "Availability:" }</strong>{ format!(" {}", availability_text(activity)) }</p>
          <div class="participants">
            <h5>{ "Participants" }</h5>
            if activity.participants.is_empty() {
              <p class="no-participants">{ "No participants yet" }</p>
            } else {
              <ul class="participants-list">
                { for activity.participants.iter().map(|email| {
                    let onclick = {
                        let on_unregister = props.on_unregister.clone();
                        let target = (activity.name.clone(), email.clone());
                        Callback::from(move |_: MouseEvent| on_unregister.emit(target.clone()))
                    };
                    html!{
                      <li key={email.clone()}>
                        <span class="participant-pill">{ email.clone() }</span>
                        <button type="button" class="remove-participant" title="Unregister" {onclick}>{ "✕" }</button>
                      </li>
                    }
                })}
              </ul>
            }
          </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct MinimalCardProps {
    activity: Activity,
}

#[function_component(MinimalCard)]
fn minimal_card(props: &MinimalCardProps) -> Html {
    let activity = &props.activity;

    html! {
        <div class="activity-card">
          <h4>{ activity.name.clone() }</h4>
          <p>{ activity.description.clone() }</p>
          <p><strong>{ "Schedule:" }</strong>{ format!(" {}", activity.schedule) }</p>
          <p><strong>{ "Availability:" }</strong>{ format!(" {}", availability_text(activity)) }</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NoticeProps {
    notice: Option<Notice>,
}

#[function_component(NoticeBanner)]
fn notice_banner(props: &NoticeProps) -> Html {
    match &props.notice {
        Some(n) => html! {
            <div id="message" class={classes!("message", n.kind.css_class())}>{ n.text.clone() }</div>
        },
        None => html! { <div id="message" class="message hidden"></div> },
    }
}
