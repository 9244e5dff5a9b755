use gloo::console;
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};
use yew::prelude::*;

use crate::effects::{self, EggCounter, Follower, Particle, Point, RevealLatch, Typewriter};
use crate::projects::{self, ProjectMap, ProjectRecord};

const PHRASES: &[&str] = &[
    "Transforming ideas into stories",
    "Crafting engaging content",
    "Making brands memorable",
    "Telling stories that connect",
];

/// Elements that flip the custom cursor into its hover presentation.
const INTERACTIVE_SELECTOR: &str = "a, button, .project-card, .magnetic";

fn document() -> Option<web_sys::Document> {
    window().and_then(|w| w.document())
}

fn document_listener(
    event_type: &'static str,
    callback: impl FnMut(&Event) + 'static,
) -> Option<EventListener> {
    let document = document()?;
    Some(EventListener::new(&document, event_type, callback))
}

fn window_listener(
    event_type: &'static str,
    callback: impl FnMut(&Event) + 'static,
) -> Option<EventListener> {
    let win = window()?;
    Some(EventListener::new(&win, event_type, callback))
}

fn pointer_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn element_bounds(element: &Element) -> effects::Bounds {
    let rect = element.get_bounding_client_rect();
    effects::Bounds {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

// Yew delegates events at the app root, so geometry comes from the element's
// own NodeRef rather than the event's currentTarget.
fn ref_bounds(node_ref: &NodeRef) -> Option<effects::Bounds> {
    node_ref.cast::<Element>().map(|el| element_bounds(&el))
}

fn set_body_overflow(value: &str) {
    if let Some(body) = document().and_then(|d| d.body()) {
        let _ = body.style().set_property("overflow", value);
    }
}

fn scroll_to_anchor(href: &str) {
    let Some(id) = href.strip_prefix('#') else {
        return;
    };
    let Some(document) = document() else {
        return;
    };

    match document.get_element_by_id(id) {
        Some(target) => {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        }
        None => console::warn!("smooth-scroll target missing:", href),
    }
}

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

/// Run `callback` every animation frame until the pending frame in the slot
/// is dropped.
fn start_frame_loop(callback: impl FnMut() + 'static) -> FrameSlot {
    let slot: FrameSlot = Rc::new(RefCell::new(None));
    let callback: Rc<RefCell<dyn FnMut()>> = Rc::new(RefCell::new(callback));
    schedule_frame(&slot, callback);
    slot
}

fn schedule_frame(slot: &FrameSlot, callback: Rc<RefCell<dyn FnMut()>>) {
    let slot_handle = slot.clone();
    let frame = request_animation_frame(move |_timestamp| {
        callback.borrow_mut()();
        schedule_frame(&slot_handle, callback.clone());
    });
    *slot.borrow_mut() = Some(frame);
}

type TimeoutSlot = Rc<RefCell<Option<Timeout>>>;

/// Self-rescheduling timeout chain; each invocation of `tick` returns the
/// delay until the next one. Taking the pending timeout out of the slot stops
/// the chain.
fn schedule_tick(slot: &TimeoutSlot, delay_ms: u32, tick: Rc<RefCell<dyn FnMut() -> u32>>) {
    let slot_handle = slot.clone();
    let timeout = Timeout::new(delay_ms, move || {
        let next_delay = tick.borrow_mut()();
        schedule_tick(&slot_handle, next_delay, tick.clone());
    });
    *slot.borrow_mut() = Some(timeout);
}

fn position_element(node_ref: &NodeRef, point: Point) {
    if let Some(element) = node_ref.cast::<HtmlElement>() {
        let style = element.style();
        let _ = style.set_property("left", &format!("{:.2}px", point.x));
        let _ = style.set_property("top", &format!("{:.2}px", point.y));
    }
}

fn targets_interactive(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest(INTERACTIVE_SELECTOR).ok().flatten())
        .is_some()
}

struct CursorHandles {
    _mousemove: Option<EventListener>,
    _hover_on: Option<EventListener>,
    _hover_off: Option<EventListener>,
    frame: FrameSlot,
}

#[function_component(CursorTrail)]
fn cursor_trail() -> Html {
    let dot_ref = use_node_ref();
    let ring_ref = use_node_ref();
    let hovered = use_state_eq(|| false);

    {
        let dot_ref = dot_ref.clone();
        let ring_ref = ring_ref.clone();
        let hovered = hovered.clone();
        use_effect_with((), move |_| {
            let pointer = Rc::new(Cell::new(Point::default()));

            let mousemove = {
                let pointer = pointer.clone();
                document_listener("mousemove", move |event| {
                    if let Some(event) = event.dyn_ref::<MouseEvent>() {
                        pointer.set(pointer_point(event));
                    }
                })
            };

            let hover_on = {
                let hovered = hovered.clone();
                document_listener("mouseover", move |event| {
                    if targets_interactive(event) {
                        hovered.set(true);
                    }
                })
            };

            let hover_off = document_listener("mouseout", move |event| {
                if targets_interactive(event) {
                    hovered.set(false);
                }
            });

            let mut follower = Follower::new();
            let frame = start_frame_loop(move || {
                follower.step(pointer.get());
                position_element(&dot_ref, follower.dot());
                position_element(&ring_ref, follower.ring());
            });

            let handles = CursorHandles {
                _mousemove: mousemove,
                _hover_on: hover_on,
                _hover_off: hover_off,
                frame,
            };
            move || {
                handles.frame.borrow_mut().take();
            }
        });
    }

    html! {
        <div class={classes!("cursor", hovered.then_some("hover"))} aria-hidden="true">
            <div class="cursor-dot" ref={dot_ref}></div>
            <div class="cursor-ring" ref={ring_ref}></div>
        </div>
    }
}

#[function_component(TypewriterText)]
fn typewriter_text() -> Html {
    let text = use_state_eq(String::new);

    {
        let text = text.clone();
        use_effect_with((), move |_| {
            let slot: TimeoutSlot = Rc::new(RefCell::new(None));
            let mut machine = Typewriter::new(PHRASES);
            let tick: Rc<RefCell<dyn FnMut() -> u32>> = Rc::new(RefCell::new(move || {
                let step = machine.tick();
                text.set(step.text);
                step.delay_ms
            }));
            schedule_tick(&slot, effects::TYPEWRITER_START_DELAY_MS, tick);

            move || {
                slot.borrow_mut().take();
            }
        });
    }

    html! { <span class="typewriter">{(*text).clone()}</span> }
}

#[derive(Properties, PartialEq)]
struct MagneticProps {
    href: AttrValue,
    #[prop_or_default]
    class: Classes,
    #[prop_or_default]
    children: Html,
}

/// Anchor that leans toward the pointer while hovered. In-page `#` targets
/// also get smooth scrolling instead of default navigation.
#[function_component(Magnetic)]
fn magnetic(props: &MagneticProps) -> Html {
    let anchor_ref = use_node_ref();
    let transform = use_state_eq(String::new);

    let onmousemove = {
        let anchor_ref = anchor_ref.clone();
        let transform = transform.clone();
        Callback::from(move |event: MouseEvent| {
            if let Some(bounds) = ref_bounds(&anchor_ref) {
                transform.set(effects::magnetic_transform(pointer_point(&event), bounds));
            }
        })
    };

    let onmouseleave = {
        let transform = transform.clone();
        Callback::from(move |_: MouseEvent| transform.set(String::new()))
    };

    let onclick = {
        let href = props.href.clone();
        Callback::from(move |event: MouseEvent| {
            if href.starts_with('#') {
                event.prevent_default();
                scroll_to_anchor(&href);
            }
        })
    };

    let style = (!transform.is_empty()).then(|| format!("transform: {};", *transform));

    html! {
        <a
            ref={anchor_ref}
            class={classes!("magnetic", props.class.clone())}
            href={props.href.clone()}
            style={style}
            onmousemove={onmousemove}
            onmouseleave={onmouseleave}
            onclick={onclick}
        >
            { props.children.clone() }
        </a>
    }
}

#[derive(Properties, PartialEq)]
struct NavLinkProps {
    href: AttrValue,
    label: AttrValue,
}

#[function_component(NavLink)]
fn nav_link(props: &NavLinkProps) -> Html {
    let onclick = {
        let href = props.href.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            scroll_to_anchor(&href);
        })
    };

    html! {
        <a class="nav-link" href={props.href.clone()} onclick={onclick}>
            {props.label.clone()}
        </a>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    id: AttrValue,
    record: ProjectRecord,
    on_open: Callback<AttrValue>,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let card_ref = use_node_ref();
    let transform = use_state_eq(String::new);

    let onmousemove = {
        let card_ref = card_ref.clone();
        let transform = transform.clone();
        Callback::from(move |event: MouseEvent| {
            if let Some(bounds) = ref_bounds(&card_ref) {
                transform.set(effects::tilt_transform(pointer_point(&event), bounds));
            }
        })
    };

    let onmouseleave = {
        let transform = transform.clone();
        Callback::from(move |_: MouseEvent| transform.set(String::new()))
    };

    let onclick = {
        let id = props.id.clone();
        let on_open = props.on_open.clone();
        Callback::from(move |_: MouseEvent| on_open.emit(id.clone()))
    };

    let style = (!transform.is_empty()).then(|| format!("transform: {};", *transform));

    html! {
        <article
            ref={card_ref}
            class="project-card tilt-effect scroll-reveal"
            data-project={props.id.clone()}
            style={style}
            onclick={onclick}
            onmousemove={onmousemove}
            onmouseleave={onmouseleave}
        >
            <h3 class="project-title">{props.record.title.clone()}</h3>
            <p class="project-subtitle">{props.record.subtitle.clone()}</p>
        </article>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectModalProps {
    record: ProjectRecord,
    on_close: Callback<()>,
}

/// Pure rendering of one project record into the overlay panel.
#[function_component(ProjectModal)]
fn project_modal(props: &ProjectModalProps) -> Html {
    let overlay_ref = use_node_ref();

    let on_backdrop_click = {
        let overlay_ref = overlay_ref.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |event: MouseEvent| {
            // Clicks inside the panel bubble up with a different target;
            // only a click landing on the backdrop itself closes.
            let on_backdrop = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .zip(overlay_ref.cast::<Element>())
                .map(|(target, overlay)| target == overlay)
                .unwrap_or(false);
            if on_backdrop {
                on_close.emit(());
            }
        })
    };

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div
            id="modal-overlay"
            class="modal-overlay active"
            ref={overlay_ref}
            onclick={on_backdrop_click}
        >
            <div class="modal" role="dialog" aria-modal="true" aria-label={props.record.title.clone()}>
                <button
                    class="modal-close"
                    type="button"
                    aria-label="Close project details"
                    onclick={on_close_click}
                >
                    {"×"}
                </button>
                <img
                    class="modal-hero"
                    src={props.record.hero_image.clone()}
                    alt={props.record.title.clone()}
                />
                <h2 class="modal-title">{props.record.title.clone()}</h2>
                <p class="modal-subtitle">{props.record.subtitle.clone()}</p>
                <p class="modal-description">{props.record.description.clone()}</p>
                { modal_section("Role", &props.record.role) }
                { modal_section("Challenge", &props.record.challenge) }
                { modal_section("Solution", &props.record.solution) }
                { modal_section("Outcome", &props.record.outcome) }
                <div class="modal-section">
                    <h4>{"Tools Used"}</h4>
                    <div class="modal-tools">
                        { for props.record.tools.iter().map(|tool| html! {
                            <span class="modal-tool">{tool.clone()}</span>
                        }) }
                    </div>
                </div>
            </div>
        </div>
    }
}

fn modal_section(heading: &'static str, body: &str) -> Html {
    html! {
        <div class="modal-section">
            <h4>{heading}</h4>
            <p>{body.to_string()}</p>
        </div>
    }
}

struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

fn observe_reveals() -> Option<RevealObserver> {
    let document = document()?;

    let nodes = document.query_selector_all(".scroll-reveal").ok()?;
    let mut elements = Vec::with_capacity(nodes.length() as usize);
    for index in 0..nodes.length() {
        if let Some(node) = nodes.item(index) {
            if let Ok(element) = node.dyn_into::<Element>() {
                elements.push(element);
            }
        }
    }

    // One latch per observed element; the latch is one-way, so elements stay
    // revealed after scrolling back out.
    let mut latches = vec![RevealLatch::default(); elements.len()];
    let targets = elements.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            let Some(position) = targets.iter().position(|el| *el == target) else {
                continue;
            };
            if latches[position].update(entry.is_intersecting()) {
                let _ = target.class_list().add_1("revealed");
            }
        }
    });

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(effects::REVEAL_THRESHOLD));
    options.set_root_margin(effects::REVEAL_ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;

    for element in &elements {
        observer.observe(element);
    }

    Some(RevealObserver {
        observer,
        _callback: callback,
    })
}

fn spawn_confetti() {
    let Some(document) = document() else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };

    let mut rng = js_sys::Math::random;
    for _ in 0..effects::CONFETTI_COUNT {
        let particle = Particle::random(&mut rng);
        let Ok(node) = document.create_element("div") else {
            continue;
        };
        let _ = node.set_attribute("class", "confetti");
        let _ = node.set_attribute("style", &particle.css_text());
        let _ = body.append_child(&node);

        // Fixed cleanup delay, independent of the particle's own fall
        // duration.
        Timeout::new(effects::CONFETTI_CLEANUP_MS, move || node.remove()).forget();
    }
}

#[function_component(App)]
fn app() -> Html {
    let projects = use_memo((), |_| match projects::load_projects() {
        Ok(map) => map,
        Err(err) => {
            console::error!("project data failed to parse:", err.to_string());
            ProjectMap::new()
        }
    });
    let active_project = use_state(|| Option::<ProjectRecord>::None);
    let egg = use_mut_ref(EggCounter::default);
    let nav_ref = use_node_ref();

    // Scroll reveal: observe once after first render, disconnect on unmount.
    use_effect_with((), move |_| {
        let observed = observe_reveals();
        move || {
            if let Some(observed) = &observed {
                observed.observer.disconnect();
            }
        }
    });

    // Nav background follows the scroll offset.
    {
        let nav_ref = nav_ref.clone();
        use_effect_with((), move |_| {
            let listener = window_listener("scroll", move |_| {
                let Some(win) = window() else {
                    return;
                };
                let offset = win.scroll_y().unwrap_or(0.0);
                if let Some(nav) = nav_ref.cast::<HtmlElement>() {
                    let _ = nav
                        .style()
                        .set_property("background", effects::nav_background(offset));
                }
            });
            move || drop(listener)
        });
    }

    // While the modal is open: page scroll suppressed, Escape closes.
    {
        let active = active_project.clone();
        use_effect_with(active_project.is_some(), move |open| {
            set_body_overflow(if *open { "hidden" } else { "" });
            let escape = open.then(|| {
                document_listener("keydown", move |event| {
                    if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                        if event.key() == "Escape" {
                            active.set(None);
                        }
                    }
                })
            });
            move || drop(escape)
        });
    }

    let on_open = {
        let active = active_project.clone();
        let projects = projects.clone();
        Callback::from(move |id: AttrValue| match projects.get(id.as_str()) {
            Some(record) => active.set(Some(record.clone())),
            None => console::warn!("unknown project id:", id.as_str()),
        })
    };

    let on_close = {
        let active = active_project.clone();
        Callback::from(move |_: ()| active.set(None))
    };

    let on_hero_click = {
        let egg = egg.clone();
        Callback::from(move |_: MouseEvent| {
            if egg.borrow_mut().click() {
                spawn_confetti();
            }
        })
    };

    let mut cards: Vec<_> = projects.iter().collect();
    cards.sort_by(|a, b| a.0.cmp(b.0));

    html! {
        <>
            <CursorTrail />

            <nav class="nav" ref={nav_ref}>
                <NavLink href="#top" label="Maya Reyes" />
                <div class="nav-links">
                    <NavLink href="#work" label="Work" />
                    <NavLink href="#about" label="About" />
                    <NavLink href="#contact" label="Contact" />
                </div>
            </nav>

            <header id="top" class="hero">
                <h1 class="hero-name" onclick={on_hero_click}>{"Maya Reyes"}</h1>
                <p class="hero-tagline"><TypewriterText /></p>
                <Magnetic href="#work" class={classes!("hero-cta")}>
                    {"See the work"}
                </Magnetic>
            </header>

            <main>
                <section id="work" class="section scroll-reveal" aria-labelledby="work-heading">
                    <h2 id="work-heading">{"Selected Work"}</h2>
                    <div class="project-grid">
                        { for cards.iter().map(|(id, record)| html! {
                            <ProjectCard
                                key={id.as_str()}
                                id={AttrValue::from((*id).clone())}
                                record={(*record).clone()}
                                on_open={on_open.clone()}
                            />
                        }) }
                    </div>
                </section>

                <section id="about" class="section scroll-reveal" aria-labelledby="about-heading">
                    <h2 id="about-heading">{"About"}</h2>
                    <p>
                        {"Storyteller and content strategist helping small brands find a \
                          voice people remember. A decade of films, campaigns, and \
                          documentary work, always built around one honest story."}
                    </p>
                </section>

                <section id="contact" class="section scroll-reveal" aria-labelledby="contact-heading">
                    <h2 id="contact-heading">{"Contact"}</h2>
                    <div class="contact-links">
                        <Magnetic href="mailto:hello@mayareyes.example" class={classes!("contact-link")}>
                            {"Email"}
                        </Magnetic>
                        <Magnetic href="https://www.linkedin.com/" class={classes!("contact-link")}>
                            {"LinkedIn"}
                        </Magnetic>
                        <Magnetic href="https://vimeo.com/" class={classes!("contact-link")}>
                            {"Vimeo"}
                        </Magnetic>
                    </div>
                </section>
            </main>

            {
                (*active_project).as_ref().map(|record| html! {
                    <ProjectModal record={record.clone()} on_close={on_close.clone()} />
                })
            }
        </>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
