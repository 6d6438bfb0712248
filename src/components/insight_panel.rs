//! AI Insight Panels
//!
//! Task and board level AI actions. Each action shows a spinner while the
//! request is in flight; a failed request hides it and alerts, without
//! retrying. Answers that arrive after the panel moved on are dropped.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{
    confidence_percent, Analysis, ApiResult, BoardContext, ColumnRecommendations, DeadlinePrediction,
    PrioritySuggestion, TaskBreakdown, TaskContext, WorkflowOptimization,
};
use crate::context::use_app_context;
use crate::dom;
use crate::markdown::render_summary;
use crate::requests::LatestOnly;
use crate::store::{use_app_store, AppStateStoreFields};

/// What an insight panel currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum InsightView {
    Priority(PrioritySuggestion),
    Deadline(DeadlinePrediction),
    Breakdown(TaskBreakdown),
    Columns(ColumnRecommendations),
    Workflow(WorkflowOptimization),
    Summary(String),
    Unavailable(String),
}

impl InsightView {
    fn from_analysis<T>(analysis: Analysis<T>, wrap: fn(T) -> InsightView) -> Self {
        match analysis {
            Analysis::Available(value) => wrap(value),
            Analysis::Unavailable { reason } => InsightView::Unavailable(reason),
        }
    }
}

/// Spinner + result pair shared by both panels
#[derive(Clone, Copy)]
struct InsightRunner {
    loading: RwSignal<bool>,
    result: RwSignal<Option<InsightView>>,
    requests: StoredValue<LatestOnly>,
}

impl InsightRunner {
    fn new() -> Self {
        Self {
            loading: RwSignal::new(false),
            result: RwSignal::new(None),
            requests: StoredValue::new(LatestOnly::new()),
        }
    }

    fn run<T, Fut>(&self, request: Fut, wrap: fn(T) -> InsightView)
    where
        T: 'static,
        Fut: Future<Output = ApiResult<Analysis<T>>> + 'static,
    {
        if self.requests.with_value(|r| r.in_flight()) {
            return;
        }
        let runner = *self;
        let ticket = runner.requests.try_update_value(|r| r.begin());
        let Some(ticket) = ticket else { return };
        runner.loading.set(true);
        spawn_local(async move {
            let outcome = request.await;
            if !runner.requests.try_update_value(|r| r.finish(ticket)).unwrap_or(false) {
                tracing::debug!("dropping AI answer for a superseded request");
                return;
            }
            runner.loading.set(false);
            match outcome {
                Ok(analysis) => runner.result.set(Some(InsightView::from_analysis(analysis, wrap))),
                Err(e) => {
                    tracing::error!("AI request failed: {}", e);
                    dom::alert(&format!("AI request failed: {}", e));
                }
            }
        });
    }

    /// Forget the shown result and any request still in flight
    fn clear(&self) {
        self.requests.update_value(|r| r.invalidate());
        self.loading.set(false);
        self.result.set(None);
    }
}

fn list_view(items: Vec<String>) -> impl IntoView {
    view! { <ul>{items.into_iter().map(|i| view! { <li>{i}</li> }).collect_view()}</ul> }
}

fn confidence_view(confidence: Option<f64>) -> impl IntoView {
    confidence.map(|c| view! { <span class="ai-confidence">{format!("{}% confidence", confidence_percent(c))}</span> })
}

fn render_insight(insight: InsightView) -> AnyView {
    match insight {
        InsightView::Priority(p) => view! {
            <div class="ai-result ai-priority">
                <strong>{format!("Suggested priority: {}", p.priority.label())}</strong>
                {confidence_view(p.confidence)}
                <p>{p.reasoning}</p>
                {list_view(p.factors)}
            </div>
        }
        .into_any(),
        InsightView::Deadline(d) => view! {
            <div class="ai-result ai-deadline">
                <strong>{format!("Predicted deadline: {}", d.date.format("%b %-d, %Y"))}</strong>
                {confidence_view(d.confidence)}
                <p>{d.reasoning}</p>
                {list_view(d.risk_factors)}
            </div>
        }
        .into_any(),
        InsightView::Breakdown(b) => view! {
            <div class="ai-result ai-breakdown">
                <p>{b.reasoning}</p>
                <ol>
                    {b.subtasks
                        .into_iter()
                        .map(|s| view! {
                            <li>
                                <strong>{s.title}</strong>
                                {s.estimated_effort.map(|e| view! { <span class="ai-effort">{e}</span> })}
                                {s.description.map(|d| view! { <p>{d}</p> })}
                            </li>
                        })
                        .collect_view()}
                </ol>
            </div>
        }
        .into_any(),
        InsightView::Columns(r) => view! {
            <div class="ai-result ai-columns">
                <p>{r.reasoning}</p>
                <ul>
                    {r.columns
                        .into_iter()
                        .map(|c| view! {
                            <li><strong>{c.name}</strong>{c.description.map(|d| view! { <span>{format!(" - {}", d)}</span> })}</li>
                        })
                        .collect_view()}
                </ul>
            </div>
        }
        .into_any(),
        InsightView::Workflow(w) => view! {
            <div class="ai-result ai-workflow">
                {w.health_score.map(|h| view! { <strong>{format!("Workflow health: {:.0}/100", h)}</strong> })}
                {w.summary.map(|s| view! { <div inner_html=render_summary(&s)></div> })}
                <h4>"Bottlenecks"</h4>
                <ul>
                    {w.bottlenecks
                        .into_iter()
                        .map(|b| view! { <li><strong>{b.area}</strong>{format!(": {}", b.description)}</li> })
                        .collect_view()}
                </ul>
                <h4>"Recommendations"</h4>
                <ul>
                    {w.recommendations
                        .into_iter()
                        .map(|r| view! {
                            <li>
                                <strong>{r.title}</strong>
                                {r.impact.map(|i| view! { <span class="ai-impact">{format!(" ({} impact)", i)}</span> })}
                                <p>{r.description}</p>
                            </li>
                        })
                        .collect_view()}
                </ul>
            </div>
        }
        .into_any(),
        InsightView::Summary(s) => view! { <div class="ai-result ai-summary" inner_html=render_summary(&s)></div> }.into_any(),
        InsightView::Unavailable(reason) => view! { <div class="ai-result ai-unavailable">{reason}</div> }.into_any(),
    }
}

#[component]
fn InsightBody(runner: InsightRunner) -> impl IntoView {
    view! {
        <Show when=move || runner.loading.get()>
            <div class="ai-spinner">"Thinking..."</div>
        </Show>
        {move || runner.result.get().map(render_insight)}
    }
}

/// AI actions for the selected task
#[component]
pub fn TaskInsights() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let runner = InsightRunner::new();

    // A different task invalidates the previous result
    Effect::new(move |_| {
        store.selected_task().track();
        runner.clear();
    });

    let task_context = move || {
        let task_id = store.selected_task().get_untracked()?;
        store
            .board()
            .with_untracked(|b| b.task(&task_id).map(|t| TaskContext::from_task(b, t)))
    };

    let suggest_priority = move |_| {
        let Some(task) = task_context() else { return };
        let client = ctx.client();
        runner.run(async move { client.suggest_priority(&task).await }, InsightView::Priority);
    };
    let predict_deadline = move |_| {
        let Some(task) = task_context() else { return };
        let client = ctx.client();
        runner.run(async move { client.predict_deadline(&task).await }, InsightView::Deadline);
    };
    let break_down = move |_| {
        let Some(task) = task_context() else { return };
        let client = ctx.client();
        runner.run(async move { client.suggest_breakdown(&task).await }, InsightView::Breakdown);
    };
    let summarize = move |_| {
        let Some(task) = task_context() else { return };
        let client = ctx.client();
        runner.run(async move { client.summarize_task(&task.task_id).await }, InsightView::Summary);
    };

    let title = move || {
        let task_id = store.selected_task().get()?;
        store.board().with(|b| b.task(&task_id).map(|t| t.title.clone()))
    };

    view! {
        <Show when=move || title().is_some()>
            <aside class="insight-panel task-insights">
                <header>
                    <h3>{title}</h3>
                    <button class="insight-close" on:click=move |_| *store.selected_task().write() = None>"×"</button>
                </header>
                <div class="insight-actions">
                    <button on:click=suggest_priority>"Suggest priority"</button>
                    <button on:click=predict_deadline>"Predict deadline"</button>
                    <button on:click=break_down>"Break down"</button>
                    <button on:click=summarize>"Summarize"</button>
                </div>
                <InsightBody runner=runner />
            </aside>
        </Show>
    }
}

/// AI actions for the whole board
#[component]
pub fn BoardInsights() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let runner = InsightRunner::new();

    // Board analysis goes stale once tasks move
    Effect::new(move |prev: Option<u32>| {
        let version = store.moves_version().get();
        if prev.is_some_and(|p| p != version) {
            runner.clear();
        }
        version
    });

    let summarize = move |_| {
        let board_id = store.board().with_untracked(|b| b.id.clone());
        let client = ctx.client();
        runner.run(async move { client.summarize_board(&board_id).await }, InsightView::Summary);
    };
    let recommend_columns = move |_| {
        let board = store.board().with_untracked(BoardContext::from_board);
        let client = ctx.client();
        runner.run(async move { client.recommend_columns(&board).await }, InsightView::Columns);
    };
    let analyze_workflow = move |_| {
        let board = store.board().with_untracked(BoardContext::from_board);
        let client = ctx.client();
        runner.run(async move { client.analyze_workflow(&board).await }, InsightView::Workflow);
    };

    view! {
        <aside class="insight-panel board-insights">
            <header><h3>"Board insights"</h3></header>
            <div class="insight-actions">
                <button on:click=summarize>"Summarize board"</button>
                <button on:click=recommend_columns>"Recommend columns"</button>
                <button on:click=analyze_workflow>"Analyze workflow"</button>
            </div>
            <InsightBody runner=runner />
        </aside>
    }
}
