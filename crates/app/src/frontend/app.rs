//! Leptos application with routing.

use leptos::*;
use leptos_router::*;

use chainboard_auth::{GateDecision, LocalStorageSessionStore, SessionConfig};
use chainboard_client::{ApiClient, ClientConfig, SupplyChainApi};
use chainboard_core::{ItemId, OrderId, Role, Route as AppRoute};
use chainboard_orders::{DashboardInsights, OrderStatus, PerformanceReport};

use crate::navigator::Navigator;
use crate::views::{
    self, BuyerDashboard, CollectionState, Control, Dashboard, InlineErrors, Loadable, LoginView,
    ManagerDashboard, ModelCell, RegisterView, SupplierDashboard,
};

type AppNavigator = Navigator<LocalStorageSessionStore>;

/// Shared by every page through the Leptos context.
#[derive(Clone)]
struct AppContext {
    navigator: AppNavigator,
    client: ClientConfig,
}

impl AppContext {
    /// Client carrying the current session's token. Built per request so a
    /// login or logout takes effect on the next call.
    fn api(&self) -> ApiClient {
        ApiClient::for_session(&self.client, self.navigator.session().as_ref())
    }
}

fn replace_history() -> NavigateOptions {
    NavigateOptions {
        replace: true,
        ..Default::default()
    }
}

impl<D: 'static> ModelCell for RwSignal<D> {
    type Model = D;

    fn modify<R>(&self, f: impl FnOnce(&mut D) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Issue the view's mount reads. Each lands on the signal when it arrives.
fn mount_reads<D: Dashboard + 'static>(state: RwSignal<D>, context: &AppContext) {
    let api = context.api();
    spawn_local(async move {
        views::load(&state, &api, D::MOUNT).await;
    });
}

/// Begin an action on the live view-model, then land its outcome on
/// whatever the signal holds when the response arrives.
fn dispatch<D, F>(state: RwSignal<D>, context: &AppContext, begin: F)
where
    D: Dashboard + 'static,
    D::Request: 'static,
    F: FnOnce(&mut D) -> Option<D::Request>,
{
    let Some(request) = state.try_update(begin).flatten() else {
        return;
    };
    let api = context.api();
    spawn_local(async move {
        views::complete(&state, &api, request).await;
    });
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let session = SessionConfig::default();
    provide_context(AppContext {
        navigator: Navigator::new(LocalStorageSessionStore::new(&session)),
        client: ClientConfig::from_env(),
    });

    view! {
        <Router>
            <main>
                <Routes>
                    <Route
                        path=AppRoute::Login.path()
                        view=|| view! { <Gated route=AppRoute::Login><LoginPage/></Gated> }
                    />
                    <Route
                        path=AppRoute::Register.path()
                        view=|| view! { <Gated route=AppRoute::Register><RegisterPage/></Gated> }
                    />
                    <Route
                        path=AppRoute::Buyer.path()
                        view=|| view! { <Gated route=AppRoute::Buyer><BuyerPage/></Gated> }
                    />
                    <Route
                        path=AppRoute::Supplier.path()
                        view=|| view! { <Gated route=AppRoute::Supplier><SupplierPage/></Gated> }
                    />
                    <Route
                        path=AppRoute::Manager.path()
                        view=|| view! { <Gated route=AppRoute::Manager><ManagerPage/></Gated> }
                    />
                    <Route
                        path="/*any"
                        view=|| view! { <Redirect path=AppRoute::ENTRY.path() options=replace_history()/> }
                    />
                </Routes>
            </main>
        </Router>
    }
}

/// Public or authenticated gate, picked by the route. Re-evaluated on every
/// path change.
#[component]
fn Gated(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    let context = expect_context::<AppContext>();
    let location = use_location();

    move || {
        let path = location.pathname.get();
        match context.navigator.evaluate(route, &path) {
            GateDecision::Render => children().into_view(),
            GateDecision::RedirectTo(target) => {
                tracing::info!(from = %path, to = target, "gate redirect");
                view! { <Redirect path=target options=replace_history()/> }.into_view()
            }
        }
    }
}

#[component]
fn LogoutButton() -> impl IntoView {
    let context = expect_context::<AppContext>();
    let navigate = use_navigate();

    let logout = move |_: ev::MouseEvent| match context.navigator.logout() {
        Ok(navigation) => navigate(navigation.path(), Default::default()),
        Err(err) => tracing::error!(error = %err, "logout failed"),
    };

    view! { <button class="btn btn-danger" on:click=logout>"Logout"</button> }
}

fn collection_notice<T>(state: &CollectionState<T>, empty: &'static str) -> Option<View> {
    match state {
        CollectionState::Loading => Some(view! { <p class="loading">"Loading..."</p> }.into_view()),
        CollectionState::Empty => Some(view! { <div class="alert alert-info">{empty}</div> }.into_view()),
        CollectionState::Failed(message) => {
            Some(view! { <div class="alert alert-danger">{message.clone()}</div> }.into_view())
        }
        CollectionState::Populated(_) => None,
    }
}

fn inline_error(errors: &InlineErrors, control: Control) -> Option<View> {
    errors.get(control).map(|message| {
        view! { <div class="alert alert-danger inline">{message.to_string()}</div> }.into_view()
    })
}

fn insights_panel(insights: &Loadable<DashboardInsights>) -> View {
    match insights {
        Loadable::Loading => view! { <p class="loading">"Loading insights..."</p> }.into_view(),
        Loadable::Failed(message) => {
            view! { <div class="alert alert-danger">{message.clone()}</div> }.into_view()
        }
        Loadable::Ready(insights) => view! {
            <ul class="insights">
                <li>"Inventory items: " {insights.total_inventory_items}</li>
                <li>"Total orders: " {insights.total_orders}</li>
                <li>"Pending: " {insights.pending_orders}</li>
                <li>"Shipped: " {insights.shipped_orders}</li>
                <li>"Delivered: " {insights.delivered_orders}</li>
                <li>"Cancelled: " {insights.cancelled_orders}</li>
            </ul>
        }
        .into_view(),
    }
}

fn report_panel(report: &PerformanceReport) -> View {
    view! {
        <div class="report">
            <h4>"Performance Report"</h4>
            <p>"Generated " {report.generated_at.format("%Y-%m-%d %H:%M UTC").to_string()}</p>
            <p>"Delivery rate: " {format!("{:.1}%", report.delivery_rate * 100.0)}</p>
            <p>"Cancellation rate: " {format!("{:.1}%", report.cancellation_rate * 100.0)}</p>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Item"</th>
                        <th>"Units ordered"</th>
                        <th>"Orders"</th>
                    </tr>
                </thead>
                <tbody>
                    {report
                        .item_volumes
                        .iter()
                        .map(|volume| {
                            view! {
                                <tr>
                                    <td>{volume.item_name.clone()}</td>
                                    <td>{volume.quantity}</td>
                                    <td>{volume.orders}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
    .into_view()
}

/// Login page component.
#[component]
fn LoginPage() -> impl IntoView {
    let context = expect_context::<AppContext>();
    let navigate = use_navigate();
    let form = create_rw_signal(LoginView::new());

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(credentials) = form.try_update(LoginView::begin_submit).flatten() else {
            return;
        };
        let context = context.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = context.api().login(&credentials).await;
            let navigation = form
                .try_update(|view| view.finish_submit(result, &context.navigator))
                .flatten();
            if let Some(navigation) = navigation {
                navigate(navigation.path(), Default::default());
            }
        });
    };

    view! {
        <div class="container auth">
            <h2>"Login"</h2>
            <form on:submit=submit>
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || form.with(|f| f.credentials.email.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.credentials.email = value);
                    }
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || form.with(|f| f.credentials.password.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.credentials.password = value);
                    }
                />
                {move || {
                    form.with(|f| f.error().map(str::to_string))
                        .map(|error| view! { <div class="alert alert-danger">{error}</div> })
                }}
                <button type="submit" class="btn btn-primary" disabled=move || form.with(LoginView::is_submitting)>
                    "Login"
                </button>
            </form>
            <p>"Don't have an account? " <A href=AppRoute::Register.path()>"Register"</A></p>
        </div>
    }
}

/// Registration page component.
#[component]
fn RegisterPage() -> impl IntoView {
    let context = expect_context::<AppContext>();
    let navigate = use_navigate();
    let form = create_rw_signal(RegisterView::new());

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(registration) = form.try_update(RegisterView::begin_submit).flatten() else {
            return;
        };
        let context = context.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = context.api().register(&registration).await;
            let navigation = form
                .try_update(|view| view.finish_submit(result, &context.navigator))
                .flatten();
            if let Some(navigation) = navigation {
                navigate(navigation.path(), Default::default());
            }
        });
    };

    let field_error = move |pick: fn(&RegisterView) -> Option<String>| {
        move || form.with(pick).map(|error| view! { <small class="text-danger">{error}</small> })
    };

    view! {
        <div class="container auth">
            <h2>"Register"</h2>
            <form on:submit=submit>
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || form.with(|f| f.registration.email.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.registration.email = value);
                    }
                />
                {field_error(|f| f.field_errors().email.clone())}
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || form.with(|f| f.registration.password.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.registration.password = value);
                    }
                />
                {field_error(|f| f.field_errors().password.clone())}
                <select
                    prop:value=move || {
                        form.with(|f| {
                            f.registration.role.as_ref().map(|r| r.as_str().to_string()).unwrap_or_default()
                        })
                    }
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.registration.role = (!value.is_empty()).then(|| Role::parse(&value)));
                    }
                >
                    <option value="">"Select user type"</option>
                    {Role::REGISTRABLE
                        .iter()
                        .map(|role| {
                            view! { <option value=role.as_str().to_string()>{role.label().to_string()}</option> }
                        })
                        .collect_view()}
                </select>
                {field_error(|f| f.field_errors().role.clone())}
                {move || {
                    form.with(|f| f.error().map(str::to_string))
                        .map(|error| view! { <div class="alert alert-danger">{error}</div> })
                }}
                <button type="submit" class="btn btn-primary" disabled=move || form.with(RegisterView::is_submitting)>
                    "Register"
                </button>
            </form>
            <p>"Already registered? " <A href=AppRoute::Login.path()>"Login"</A></p>
        </div>
    }
}

/// Buyer dashboard component.
#[component]
fn BuyerPage() -> impl IntoView {
    let context = expect_context::<AppContext>();
    let state = create_rw_signal(BuyerDashboard::new());
    mount_reads(state, &context);

    let place_order = {
        let context = context.clone();
        move |_: ev::MouseEvent| dispatch(state, &context, BuyerDashboard::begin_place_order)
    };
    let save_edit = {
        let context = context.clone();
        move |_: ev::MouseEvent| dispatch(state, &context, BuyerDashboard::begin_save_edit)
    };

    let active_rows = move || {
        state.with(|vm| {
            let editing = vm.editing().map(|(id, _)| id);
            vm.active_orders()
                .map(|order| {
                    let id = order.order_id;
                    let status = order.status.label();
                    if editing == Some(id) {
                        let save_edit = save_edit.clone();
                        view! {
                            <tr>
                                <td>{id.to_string()}</td>
                                <td>
                                    <input
                                        prop:value=move || {
                                            state.with(|vm| vm.editing().map(|(_, u)| u.item_name.clone()).unwrap_or_default())
                                        }
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            state.update(|vm| {
                                                if let Some(update) = vm.edit_mut() {
                                                    update.item_name = value;
                                                }
                                            });
                                        }
                                    />
                                </td>
                                <td>
                                    <input
                                        type="number"
                                        min="1"
                                        prop:value=move || {
                                            state.with(|vm| vm.editing().map(|(_, u)| u.quantity.to_string()).unwrap_or_default())
                                        }
                                        on:input=move |ev| {
                                            if let Ok(quantity) = event_target_value(&ev).parse::<i64>() {
                                                state.update(|vm| {
                                                    if let Some(update) = vm.edit_mut() {
                                                        update.quantity = quantity;
                                                    }
                                                });
                                            }
                                        }
                                    />
                                </td>
                                <td>{status}</td>
                                <td>
                                    <button class="btn btn-success" on:click=save_edit>"Save"</button>
                                    <button class="btn btn-secondary" on:click=move |_| state.update(BuyerDashboard::cancel_edit)>
                                        "Cancel"
                                    </button>
                                </td>
                            </tr>
                        }
                    } else {
                        let item_name = order.item_name.clone();
                        let quantity = order.quantity;
                        let editable = order.is_editable();
                        let error = inline_error(vm.errors(), Control::SaveOrder(id));
                        view! {
                            <tr>
                                <td>{id.to_string()}</td>
                                <td>{item_name}</td>
                                <td>{quantity}</td>
                                <td>{status}</td>
                                <td>
                                    <button
                                        class="btn btn-warning"
                                        disabled=!editable
                                        on:click=move |_| {
                                            state.update(|vm| {
                                                vm.begin_edit(id);
                                            });
                                        }
                                    >
                                        "Edit"
                                    </button>
                                    {error}
                                </td>
                            </tr>
                        }
                    }
                })
                .collect_view()
        })
    };

    let history_rows = move || {
        state.with(|vm| {
            vm.order_history()
                .map(|order| {
                    view! {
                        <tr>
                            <td>{order.order_id.to_string()}</td>
                            <td>{order.item_name.clone()}</td>
                            <td>{order.quantity}</td>
                            <td>{format!("{:.2}", order.total_cost)}</td>
                            <td>{order.status.label()}</td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div class="container dashboard">
            <header class="d-flex justify-content-between">
                <h2>"Buyer Dashboard"</h2>
                <LogoutButton/>
            </header>

            <section class="place-order">
                <h3>"Place Order"</h3>
                <select
                    prop:value=move || {
                        state.with(|vm| vm.draft.item_id.map(|id| id.to_string()).unwrap_or_default())
                    }
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        state.update(|vm| match value.parse::<ItemId>() {
                            Ok(id) => {
                                vm.select_item(id);
                            }
                            Err(_) => vm.clear_selection(),
                        });
                    }
                >
                    <option value="">"Select an item"</option>
                    {move || {
                        state.with(|vm| {
                            vm.item_options()
                                .into_iter()
                                .map(|option| {
                                    view! { <option value=option.item_id.to_string()>{option.item_name}</option> }
                                })
                                .collect_view()
                        })
                    }}
                </select>
                <input
                    type="number"
                    min="1"
                    prop:value=move || state.with(|vm| vm.draft.quantity.to_string())
                    on:input=move |ev| {
                        if let Ok(quantity) = event_target_value(&ev).parse::<i64>() {
                            state.update(|vm| vm.set_quantity(quantity));
                        }
                    }
                />
                <button class="btn btn-primary" on:click=place_order>"Place Order"</button>
                {move || state.with(|vm| inline_error(vm.errors(), Control::PlaceOrder))}
            </section>

            <section class="active-orders">
                <h3>"Active Orders"</h3>
                {move || state.with(|vm| collection_notice(vm.orders(), "No active orders to track."))}
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Order"</th>
                            <th>"Item"</th>
                            <th>"Quantity"</th>
                            <th>"Status"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>{active_rows}</tbody>
                </table>
            </section>

            <section class="order-history">
                <h3>"Order History"</h3>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Order"</th>
                            <th>"Item"</th>
                            <th>"Quantity"</th>
                            <th>"Total"</th>
                            <th>"Status"</th>
                        </tr>
                    </thead>
                    <tbody>{history_rows}</tbody>
                </table>
            </section>
        </div>
    }
}

/// Supplier dashboard component.
#[component]
fn SupplierPage() -> impl IntoView {
    let context = expect_context::<AppContext>();
    let state = create_rw_signal(SupplierDashboard::new());
    mount_reads(state, &context);

    let commit_quantity = {
        let context = context.clone();
        move |id: ItemId| {
            dispatch(state, &context, move |vm: &mut SupplierDashboard| vm.begin_commit_quantity(id))
        }
    };
    let change_status = {
        let context = context.clone();
        move |id: OrderId, status: OrderStatus| {
            dispatch(state, &context, move |vm: &mut SupplierDashboard| vm.begin_status_change(id, status))
        }
    };
    let add_item = {
        let context = context.clone();
        move |_: ev::MouseEvent| dispatch(state, &context, SupplierDashboard::begin_add_item)
    };
    let confirm_delete = {
        let context = context.clone();
        move |_: ev::MouseEvent| dispatch(state, &context, SupplierDashboard::begin_delete)
    };

    let inventory_rows = move || {
        state.with(|vm| {
            vm.inventory()
                .items()
                .iter()
                .map(|item| {
                    let id = item.id;
                    let commit_quantity = commit_quantity.clone();
                    let quantity_error = inline_error(vm.errors(), Control::SaveQuantity(id));
                    let delete_error = inline_error(vm.errors(), Control::DeleteItem(id));
                    view! {
                        <tr>
                            <td>{item.item_name.clone()}</td>
                            <td>
                                <input
                                    type="number"
                                    min="0"
                                    prop:value=move || {
                                        state.with(|vm| vm.displayed_quantity(id).map(|q| q.to_string()).unwrap_or_default())
                                    }
                                    on:input=move |ev| {
                                        if let Ok(quantity) = event_target_value(&ev).parse::<i64>() {
                                            state.update(|vm| vm.stage_quantity(id, quantity));
                                        }
                                    }
                                />
                            </td>
                            <td>{format!("{:.2}", item.cost)}</td>
                            <td>
                                <button
                                    class="btn btn-primary"
                                    disabled=move || state.with(|vm| !vm.has_staged(id))
                                    on:click=move |_| commit_quantity(id)
                                >
                                    "Update"
                                </button>
                                <button class="btn btn-danger" on:click=move |_| state.update(|vm| vm.request_delete(id))>
                                    "Delete"
                                </button>
                                {quantity_error}
                                {delete_error}
                            </td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    let order_rows = move || {
        state.with(|vm| {
            vm.orders()
                .items()
                .iter()
                .map(|order| {
                    let id = order.order_id;
                    let change_status = change_status.clone();
                    let error = inline_error(vm.errors(), Control::OrderStatus(id));
                    view! {
                        <tr>
                            <td>{id.to_string()}</td>
                            <td>{order.item_name.clone()}</td>
                            <td>{order.quantity}</td>
                            <td>
                                <select
                                    prop:value=order.status.as_str()
                                    on:change=move |ev| {
                                        if let Ok(status) = event_target_value(&ev).parse::<OrderStatus>() {
                                            change_status(id, status);
                                        }
                                    }
                                >
                                    {OrderStatus::ALL
                                        .iter()
                                        .map(|status| view! { <option value=status.as_str()>{status.label()}</option> })
                                        .collect_view()}
                                </select>
                                {error}
                            </td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    let new_item_form = move || {
        let add_item = add_item.clone();
        state.with(|vm| vm.new_item().is_some()).then(|| {
            view! {
                <div class="new-item">
                    <input
                        placeholder="Item name"
                        prop:value=move || state.with(|vm| vm.new_item().map(|i| i.item_name.clone()).unwrap_or_default())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|vm| {
                                if let Some(item) = vm.new_item_mut() {
                                    item.item_name = value;
                                }
                            });
                        }
                    />
                    <input
                        type="number"
                        min="0"
                        placeholder="Quantity"
                        on:input=move |ev| {
                            let quantity = event_target_value(&ev).parse::<i64>().ok();
                            state.update(|vm| {
                                if let Some(item) = vm.new_item_mut() {
                                    item.quantity = quantity;
                                }
                            });
                        }
                    />
                    <input
                        type="number"
                        min="0"
                        step="0.01"
                        placeholder="Cost"
                        on:input=move |ev| {
                            let cost = event_target_value(&ev).parse::<f64>().ok();
                            state.update(|vm| {
                                if let Some(item) = vm.new_item_mut() {
                                    item.cost = cost;
                                }
                            });
                        }
                    />
                    <button class="btn btn-success" on:click=add_item>"Save Item"</button>
                    <button class="btn btn-secondary" on:click=move |_| state.update(SupplierDashboard::close_new_item)>
                        "Cancel"
                    </button>
                </div>
            }
        })
    };

    let delete_dialog = move || {
        let confirm_delete = confirm_delete.clone();
        state.with(SupplierDashboard::pending_delete).map(|_| {
            view! {
                <div class="modal">
                    <p>"Are you sure you want to delete this item?"</p>
                    <button class="btn btn-danger" on:click=confirm_delete>"Delete"</button>
                    <button class="btn btn-secondary" on:click=move |_| state.update(SupplierDashboard::cancel_delete)>
                        "Cancel"
                    </button>
                </div>
            }
        })
    };

    view! {
        <div class="container dashboard">
            <header class="d-flex justify-content-between">
                <h2>"Supplier Dashboard"</h2>
                <LogoutButton/>
            </header>

            <section class="insights">
                <h3>"Insights"</h3>
                {move || state.with(|vm| insights_panel(vm.insights()))}
            </section>

            <section class="inventory">
                <h3>"Inventory"</h3>
                <button class="btn btn-primary" on:click=move |_| state.update(SupplierDashboard::open_new_item)>
                    "Add Item"
                </button>
                {new_item_form}
                {move || state.with(|vm| inline_error(vm.errors(), Control::AddItem))}
                {move || state.with(|vm| collection_notice(vm.inventory(), "No inventory items."))}
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Item"</th>
                            <th>"Quantity"</th>
                            <th>"Cost"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>{inventory_rows}</tbody>
                </table>
                {delete_dialog}
            </section>

            <section class="orders">
                <h3>"Orders"</h3>
                {move || state.with(|vm| collection_notice(vm.orders(), "No orders to track."))}
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Order"</th>
                            <th>"Item"</th>
                            <th>"Quantity"</th>
                            <th>"Status"</th>
                        </tr>
                    </thead>
                    <tbody>{order_rows}</tbody>
                </table>
            </section>
        </div>
    }
}

/// Manager dashboard component.
#[component]
fn ManagerPage() -> impl IntoView {
    let context = expect_context::<AppContext>();
    let state = create_rw_signal(ManagerDashboard::new());
    mount_reads(state, &context);

    let change_status = {
        let context = context.clone();
        move |id: OrderId, status: OrderStatus| {
            dispatch(state, &context, move |vm: &mut ManagerDashboard| vm.begin_status_change(id, status))
        }
    };
    let generate_report = {
        let context = context.clone();
        move |_: ev::MouseEvent| dispatch(state, &context, ManagerDashboard::begin_report)
    };

    let order_rows = move || {
        state.with(|vm| {
            vm.orders()
                .items()
                .iter()
                .map(|order| {
                    let id = order.order_id;
                    let error = inline_error(vm.errors(), Control::OrderStatus(id));
                    let actions = order
                        .status
                        .manager_transitions()
                        .iter()
                        .map(|&next| {
                            let change_status = change_status.clone();
                            view! {
                                <button class="btn btn-sm btn-outline-primary" on:click=move |_| change_status(id, next)>
                                    {next.label()}
                                </button>
                            }
                        })
                        .collect_view();
                    view! {
                        <tr>
                            <td>{id.to_string()}</td>
                            <td>{order.item_name.clone()}</td>
                            <td>{order.quantity}</td>
                            <td>{format!("{:.2}", order.total_cost)}</td>
                            <td>{order.status.label()}</td>
                            <td>{actions} {error}</td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    let inventory_rows = move || {
        state.with(|vm| {
            vm.inventory()
                .items()
                .iter()
                .map(|item| {
                    view! {
                        <tr>
                            <td>{item.item_name.clone()}</td>
                            <td>{item.quantity}</td>
                            <td>{format!("{:.2}", item.cost)}</td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div class="container dashboard">
            <header class="d-flex justify-content-between">
                <h2>"Supply Chain Manager Dashboard"</h2>
                <LogoutButton/>
            </header>

            <section class="insights">
                <h3>"Insights"</h3>
                {move || state.with(|vm| insights_panel(vm.insights()))}
            </section>

            <section class="performance">
                <h3>"Supplier Performance"</h3>
                <p>"Analyze supplier performance through reports and dashboards."</p>
                <button
                    class="btn btn-primary"
                    disabled=move || state.with(ManagerDashboard::is_generating)
                    on:click=generate_report
                >
                    "Generate Performance Report"
                </button>
                {move || state.with(|vm| inline_error(vm.errors(), Control::PerformanceReport))}
                {move || state.with(|vm| vm.report().map(report_panel))}
            </section>

            <section class="orders">
                <h3>"Orders"</h3>
                {move || state.with(|vm| collection_notice(vm.orders(), "No orders to track."))}
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Order"</th>
                            <th>"Item"</th>
                            <th>"Quantity"</th>
                            <th>"Total"</th>
                            <th>"Status"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>{order_rows}</tbody>
                </table>
            </section>

            <section class="inventory">
                <h3>"Inventory"</h3>
                {move || state.with(|vm| collection_notice(vm.inventory(), "No inventory items."))}
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Item"</th>
                            <th>"Quantity"</th>
                            <th>"Cost"</th>
                        </tr>
                    </thead>
                    <tbody>{inventory_rows}</tbody>
                </table>
            </section>
        </div>
    }
}
