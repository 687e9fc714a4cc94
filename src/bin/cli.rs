use chrono::{Local, NaiveDate};
use course_calendar::{
    AppConfig, CalendarEvent, CatalogSnapshot, CourseSchedule, JsonFileSessionStore, Projection,
    Role, ScheduleProjector, Session, SessionStore, View, authorize, load_catalog_from_json,
    parse_utc_offset, save_events_to_csv, save_events_to_json,
    access::Access,
    revenue::{daily_revenue, total_revenue},
};
use std::fs;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn render_events_as_text_table(events: &[CalendarEvent]) -> String {
    let headers = ["title", "date", "start", "end"];
    let rows: Vec<[String; 4]> = events
        .iter()
        .map(|event| {
            [
                event.title.clone(),
                event.start.format("%Y-%m-%d %a").to_string(),
                event.start.format("%H:%M %:z").to_string(),
                event.end.format("%H:%M %:z").to_string(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |cells: &[String]| {
        let mut line = String::from("|");
        for (ci, cell) in cells.iter().enumerate() {
            let pad = widths[ci].saturating_sub(cell.chars().count());
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&headers.map(String::from)[..]));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        out.push_str(&render_row(&row[..]));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  load <json_path>                   Load a catalog snapshot (courses, registrations, orders)\n  offset [+HH:MM]                    Show or set the UTC offset used for course times\n  login <user_id> <role> [token]     Sign in as STUDENT, TEACHER or ADMIN\n  logout                             Clear the session (cart included)\n  whoami                             Show the current session\n  open <path>                        Check access to a screen, e.g. /teacher/dashboard\n  schedule                           Project the signed-in user's course schedule\n  project <json_path>                Project a JSON array of course schedules\n  revenue [YYYY-MM-DD]               Teacher revenue for the week ending on the date\n  export <json|csv> <path>           Write the last projected events to disk\n  cart add <course_id>               Add a course to the cart\n  cart remove <course_id>            Remove a course from the cart\n  cart show                          Show cart contents\n  cart clear                         Empty the cart\n  quit|exit                          Exit"
    );
}

fn print_projection(projection: &Projection) {
    println!(
        "{} event(s)\n{}",
        projection.events.len(),
        render_events_as_text_table(&projection.events)
    );
    for failure in &projection.failures {
        println!(
            "Skipped '{}' (#{}): {}",
            failure.title, failure.index, failure.error
        );
    }
}

fn print_session(session: &Session) {
    match (session.user_id, session.role) {
        (Some(user_id), Some(role)) => println!("Signed in as user {user_id} ({role})"),
        _ => println!("Not signed in"),
    }
    println!("Cart items         : {}", session.cart.total_items());
}

fn persist(store: &JsonFileSessionStore, session: &Session) {
    if let Err(e) = store.save_session(session) {
        println!("Error saving session: {}", e);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };
    let mut projector = config.projector();
    let store = JsonFileSessionStore::new(config.session_path.clone());
    let mut session = store.load_session().unwrap_or_else(|e| {
        println!("Stored session unreadable ({}), starting fresh.", e);
        Session::default()
    });
    let mut catalog = match &config.catalog_path {
        Some(path) => load_catalog_from_json(path).unwrap_or_else(|e| {
            println!("Error loading catalog: {}", e);
            CatalogSnapshot::default()
        }),
        None => CatalogSnapshot::default(),
    };
    let mut last_events: Vec<CalendarEvent> = Vec::new();

    println!("Course Calendar (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "load" => match parts.next() {
                Some(path) => match load_catalog_from_json(path) {
                    Ok(loaded) => {
                        println!(
                            "Catalog loaded from {} ({} course(s), {} registration(s)).",
                            path,
                            loaded.courses.len(),
                            loaded.registrations.len()
                        );
                        catalog = loaded;
                    }
                    Err(e) => println!("Error loading catalog: {}", e),
                },
                None => println!("Usage: load <json_path>"),
            },
            "offset" => match parts.next() {
                Some(raw) => match parse_utc_offset(raw) {
                    Ok(offset) => {
                        projector = ScheduleProjector::new(offset);
                        println!("UTC offset set to {}.", offset);
                    }
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("UTC offset: {}", projector.offset()),
            },
            "login" => {
                let id_s = parts.next();
                let role_s = parts.next();
                let token = parts.next().map(str::to_string);
                match (id_s, role_s) {
                    (Some(id_s), Some(role_s)) => {
                        let user_id: i64 = match id_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid user id");
                                continue;
                            }
                        };
                        let role: Role = match role_s.parse() {
                            Ok(role) => role,
                            Err(e) => {
                                println!("Error: {}", e);
                                continue;
                            }
                        };
                        session.sign_in(token, user_id, role);
                        persist(&store, &session);
                        println!("Signed in as user {user_id} ({role}).");
                    }
                    _ => println!("Usage: login <user_id> <role> [token]"),
                }
            }
            "logout" => {
                session.sign_out();
                persist(&store, &session);
                println!("Signed out.");
            }
            "whoami" => print_session(&session),
            "open" => match parts.next() {
                Some(path) => match View::from_path(path) {
                    Some(view) => match authorize(&session, view) {
                        Access::Allowed { view } => println!("Allowed: {:?}", view),
                        Access::Forbidden { view, required } => {
                            println!("403 Forbidden: {:?} requires {}", view, required)
                        }
                    },
                    None => println!("Unknown path {}", path),
                },
                None => println!("Usage: open <path>"),
            },
            "schedule" => {
                let (Some(user_id), Some(role)) = (session.user_id, session.role) else {
                    println!("Sign in first (login <user_id> <role>).");
                    continue;
                };
                let (view, schedules) = match role {
                    Role::Student => (View::StudentSchedule, catalog.student_schedules(user_id)),
                    Role::Teacher => (View::TeacherDashboard, catalog.teacher_schedules(user_id)),
                    Role::Admin => {
                        println!("No course schedule for {}.", role);
                        continue;
                    }
                };
                if !authorize(&session, view).is_allowed() {
                    println!("403 Forbidden");
                    continue;
                }
                let projection = projector.project(&schedules);
                print_projection(&projection);
                last_events = projection.events;
            }
            "project" => match parts.next() {
                Some(path) => {
                    let parsed = fs::read_to_string(path)
                        .map_err(|e| e.to_string())
                        .and_then(|text| {
                            serde_json::from_str::<Vec<CourseSchedule>>(&text)
                                .map_err(|e| e.to_string())
                        });
                    match parsed {
                        Ok(schedules) => {
                            let projection = projector.project(&schedules);
                            print_projection(&projection);
                            last_events = projection.events;
                        }
                        Err(e) => println!("Error reading schedules: {}", e),
                    }
                }
                None => println!("Usage: project <json_path>"),
            },
            "revenue" => {
                let (Some(user_id), Some(Role::Teacher)) = (session.user_id, session.role) else {
                    println!("403 Forbidden");
                    continue;
                };
                let today = match parts.next() {
                    Some(date_s) => match NaiveDate::parse_from_str(date_s, "%Y-%m-%d") {
                        Ok(d) => d,
                        Err(_) => {
                            println!("Invalid date (YYYY-MM-DD)");
                            continue;
                        }
                    },
                    None => Local::now().date_naive(),
                };
                let course_ids: Vec<i64> = catalog
                    .teacher_courses(user_id)
                    .iter()
                    .map(|course| course.course_id)
                    .collect();
                let daily = daily_revenue(&catalog.orders, &course_ids, today);
                println!(
                    "Total revenue      : {:.2}",
                    total_revenue(&catalog.orders, &course_ids)
                );
                println!(
                    "Last 7 days        : {}",
                    daily
                        .iter()
                        .map(|v| format!("{:.2}", v))
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
            "export" => {
                let fmt = parts.next();
                let path = parts.next();
                match (fmt, path) {
                    (Some("json"), Some(path)) => match save_events_to_json(&last_events, path) {
                        Ok(_) => println!("Exported {} event(s) to {}", last_events.len(), path),
                        Err(e) => println!("Error exporting: {}", e),
                    },
                    (Some("csv"), Some(path)) => match save_events_to_csv(&last_events, path) {
                        Ok(_) => println!("Exported {} event(s) to {}", last_events.len(), path),
                        Err(e) => println!("Error exporting: {}", e),
                    },
                    _ => println!("Usage: export <json|csv> <path>"),
                }
            }
            "cart" => {
                let sub = parts.next();
                let id = parts.next().map(str::parse::<i64>);
                match (sub, id) {
                    (Some("add"), Some(Ok(course_id))) => {
                        let quantity = session.cart.add(course_id);
                        persist(&store, &session);
                        println!("Course {course_id} in cart (x{quantity}).");
                    }
                    (Some("remove"), Some(Ok(course_id))) => {
                        if session.cart.remove(course_id) {
                            persist(&store, &session);
                            println!("Course {course_id} removed from cart.");
                        } else {
                            println!("Course {course_id} not in cart.");
                        }
                    }
                    (Some("show"), None) => {
                        for course_id in session.cart.course_ids() {
                            let title = catalog
                                .find_course(course_id)
                                .map(|course| course.title().to_string())
                                .unwrap_or_default();
                            println!(
                                "  {:<8} x{:<3} {}",
                                course_id,
                                session.cart.quantity(course_id),
                                title
                            );
                        }
                        println!("Cart items         : {}", session.cart.total_items());
                    }
                    (Some("clear"), None) => {
                        session.cart.clear();
                        persist(&store, &session);
                        println!("Cart cleared.");
                    }
                    _ => println!("Usage: cart <add|remove> <course_id> | cart <show|clear>"),
                }
            }
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
