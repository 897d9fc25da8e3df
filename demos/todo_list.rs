use stackdom::prelude::*;

struct Todo {
    title: &'static str,
    done: bool,
}

fn todo_item(todo: &Todo) {
    li(Some(props! { "class" => if todo.done { "done" } else { "open" } }), || {
        span(None, todo.title);
        button(
            Some(props! {
                "disabled" => todo.done,
                "onclick" => Callback::new(|| log::info!("toggle requested")),
            }),
            "Toggle",
        );
    });
}

fn app(todos: &[Todo]) {
    let (filter, set_filter) = declare_state("all");
    // Setters are inert: this does not schedule another build.
    set_filter.set("open");

    let visible: Vec<&Todo> = todos
        .iter()
        .filter(|todo| match *filter {
            "open" => !todo.done,
            "done" => todo.done,
            _ => true,
        })
        .collect();

    div(Some(props! { "id" => "app" }), || {
        h1(None, "Todos");
        p(None, format!("Showing {} of {} items", visible.len(), todos.len()));
        ol(None, || {
            for todo in &visible {
                todo_item(todo);
            }
        });
        a(Some(props! { "href" => "#filter" }), format!("Filter: {}", *filter));
    });
}

fn main() {
    env_logger::init();

    let todos = [
        Todo {
            title: "Write the reconstructor",
            done: true,
        },
        Todo {
            title: "Render to <html>",
            done: false,
        },
    ];

    match render_to(&mut HtmlRenderer::new(), || app(&todos)) {
        Ok(html) => println!("{html}"),
        Err(err) => {
            log::error!("build failed: {err}");
            std::process::exit(1);
        }
    }
}
