//! Command handlers. Resource commands enter their route through the guard
//! before any request is made.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::collections::HashSet;
use std::future::Future;

use serde::Serialize;
use staffdesk_client::net::types::{
    CreateEmployee, CreatePosition, Employee, EmployeeList, Position, PositionList, UpdateEmployee, UpdatePosition,
};
use staffdesk_client::router::{ENTRY_PATH, View};
use staffdesk_client::{ApiClient, ApiError, Route, RouteOutcome, Router};

use crate::{CliError, EmployeesSubcommand, ListArgs, PositionsSubcommand};

// =============================================================================
// SESSION
// =============================================================================

pub async fn login(api: &ApiClient, id: &str) -> Result<(), CliError> {
    let outcome = Router::new().navigate(ENTRY_PATH, api.session());
    if outcome.was_redirected() {
        println!("already signed in; run `staffdesk logout` to switch employees");
        return Ok(());
    }
    api.login(id).await?;
    println!("signed in");
    Ok(())
}

pub fn logout(api: &ApiClient) {
    api.logout();
    println!("signed out");
}

pub fn status(api: &ApiClient) -> Result<(), CliError> {
    let authenticated = api.session().stored_token().is_some();
    print_json(&serde_json::json!({ "authenticated": authenticated }))
}

// =============================================================================
// NAVIGATION
// =============================================================================

pub async fn open(api: &ApiClient, path: &str) -> Result<(), CliError> {
    let route = arrive(Router::new().navigate(path, api.session()))?;
    match route.view {
        View::Login => {
            println!("not signed in; run `staffdesk login <employee-id>`");
            Ok(())
        }
        View::Employees => print_json(&api.employees().list(None).await?),
        View::Positions => print_json(&api.positions().list(None).await?),
    }
}

fn arrive(outcome: RouteOutcome) -> Result<&'static Route, CliError> {
    match outcome {
        RouteOutcome::Arrived { route, redirected_from } => {
            if let Some(from) = redirected_from {
                eprintln!("{from} -> {}", route.path);
            }
            Ok(route)
        }
        RouteOutcome::NotFound { path } => Err(CliError::NotFound(path)),
        RouteOutcome::Blocked { path } => Err(CliError::Blocked(path)),
    }
}

/// Enter a protected route; a redirect means there is no session.
fn enter(api: &ApiClient, path: &str) -> Result<(), CliError> {
    match Router::new().navigate(path, api.session()) {
        outcome if outcome.was_redirected() => Err(CliError::SignInRequired),
        outcome => arrive(outcome).map(|_| ()),
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

pub async fn employees(api: &ApiClient, command: EmployeesSubcommand) -> Result<(), CliError> {
    enter(api, "/employees")?;
    let employees = api.employees();
    match command {
        EmployeesSubcommand::List(args) => {
            let listed = list_pages(&args, |cursor| async move { api.employees().list(cursor.as_deref()).await }).await?;
            print_json(&listed)
        }
        EmployeesSubcommand::Get { id } => print_json(&employees.get(&id).await?),
        EmployeesSubcommand::Create { first_name, last_name, position_name, salary } => {
            let body = CreateEmployee { first_name, last_name, position_name, salary };
            print_json(&employees.create(&body).await?)
        }
        EmployeesSubcommand::Update { id, first_name, last_name, position_id } => {
            let body = UpdateEmployee { first_name, last_name, position_id };
            print_json(&employees.update(&id, &body).await?)
        }
        EmployeesSubcommand::Delete { id } => print_json(&employees.delete(&id).await?),
    }
}

pub async fn positions(api: &ApiClient, command: PositionsSubcommand) -> Result<(), CliError> {
    enter(api, "/positions")?;
    let positions = api.positions();
    match command {
        PositionsSubcommand::List(args) => {
            let listed = list_pages(&args, |cursor| async move { api.positions().list(cursor.as_deref()).await }).await?;
            print_json(&listed)
        }
        PositionsSubcommand::Get { id } => print_json(&positions.get(&id).await?),
        PositionsSubcommand::Create { name, salary } => print_json(&positions.create(&CreatePosition { name, salary }).await?),
        PositionsSubcommand::Update { id, name, salary } => {
            print_json(&positions.update(&id, &UpdatePosition { name, salary }).await?)
        }
        PositionsSubcommand::Delete { id } => print_json(&positions.delete(&id).await?),
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

pub trait Page {
    type Item: Serialize;

    fn next_cursor(&self) -> Option<&str>;
    fn into_items(self) -> Vec<Self::Item>;
}

impl Page for EmployeeList {
    type Item = Employee;

    fn next_cursor(&self) -> Option<&str> {
        EmployeeList::next_cursor(self)
    }

    fn into_items(self) -> Vec<Employee> {
        self.employees
    }
}

impl Page for PositionList {
    type Item = Position;

    fn next_cursor(&self) -> Option<&str> {
        PositionList::next_cursor(self)
    }

    fn into_items(self) -> Vec<Position> {
        self.positions
    }
}

/// One page as returned, or with `--all` every item across pages.
pub async fn list_pages<P, F, Fut>(args: &ListArgs, fetch: F) -> Result<serde_json::Value, CliError>
where
    P: Page + Serialize,
    F: Fn(Option<String>) -> Fut,
    Fut: Future<Output = Result<P, ApiError>>,
{
    let mut page = fetch(args.cursor.clone()).await?;
    if !args.all {
        return Ok(serde_json::to_value(&page)?);
    }

    let mut seen = HashSet::new();
    let mut items = Vec::new();
    loop {
        let next = page.next_cursor().map(str::to_owned);
        items.extend(page.into_items());
        let Some(cursor) = next else {
            break;
        };
        if !seen.insert(cursor.clone()) {
            return Err(CliError::CursorLoop(cursor));
        }
        tracing::debug!(cursor = %cursor, fetched = items.len(), "fetching next page");
        page = fetch(Some(cursor)).await?;
    }
    Ok(serde_json::to_value(items)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
