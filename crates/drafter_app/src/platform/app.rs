use std::time::{Duration, Instant};

use drafter_core::{update, AppState, Msg, ScreenView};
use drafter_engine::{
    default_export_dir, default_store_dir, ClientSettings, EngineEvent, EngineHandle,
    FetchSettings, PreferenceStore,
};
use drafter_logging::LogDestination;

use super::effects::{self, EffectRunner};
use super::textures::TextureCache;
use super::ui;

const WINDOW_TITLE: &str = "Drafter";

/// How long a transient notice stays visible before it expires.
const NOTICE_LIFETIME: Duration = Duration::from_secs(3);
/// Auto-advance interval for the fullscreen slideshow.
const SLIDESHOW_INTERVAL: Duration = Duration::from_secs(3);
/// Idle repaint cadence; keeps engine completions and timers flowing even
/// when the user is not interacting.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run_app() -> eframe::Result<()> {
    drafter_logging::initialize(LogDestination::Both);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([960.0, 640.0]),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(DrafterApp::new()))),
    )
}

struct DrafterApp {
    state: AppState,
    runner: EffectRunner,
    textures: TextureCache,
    zoom: f32,
    /// Notice id currently on screen and when it appeared.
    notice_shown: Option<(u64, Instant)>,
    last_slide: Instant,
}

impl DrafterApp {
    fn new() -> Self {
        let store = PreferenceStore::open(default_store_dir());
        let engine = EngineHandle::new(
            ClientSettings::default(),
            FetchSettings::default(),
            default_export_dir(),
        );
        let runner = EffectRunner::new(engine, store);
        let startup = runner.startup_preferences();

        let mut app = Self {
            state: AppState::new(),
            runner,
            textures: TextureCache::default(),
            zoom: ui::constants::DEFAULT_ZOOM,
            notice_shown: None,
            last_slide: Instant::now(),
        };
        app.apply(Msg::PreferencesLoaded(startup));
        app
    }

    /// Runs one message through the state machine and executes its effects.
    fn apply(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    /// Turns completed engine work into messages. Image downloads never
    /// reach the state machine; they land straight in the texture cache.
    fn drain_engine(&mut self, ctx: &egui::Context, out: &mut Vec<Msg>) {
        while let Some(event) = self.runner.poll() {
            match event {
                EngineEvent::GenerationFinished(result) => {
                    let mapped = self.accept_bundle(result);
                    out.push(Msg::GenerationFinished(mapped));
                }
                EngineEvent::CodeExecutionFinished(result) => {
                    let mapped = self.accept_bundle(result);
                    out.push(Msg::RegenerationFinished(mapped));
                }
                EngineEvent::PdfExtracted { path, result } => {
                    out.push(effects::pdf_result_to_msg(&path, result));
                }
                EngineEvent::ImageFetched { index, result } => match result {
                    Ok(output) => self.textures.install(ctx, index, &output.bytes),
                    Err(err) => {
                        log::warn!(
                            "Diagram image {} download failed: {}",
                            index + 1,
                            err.message
                        );
                        self.textures.mark_failed(index);
                    }
                },
                EngineEvent::ExportCompleted(result) => {
                    out.push(effects::export_result_to_msg(result));
                }
            }
        }
    }

    fn accept_bundle(
        &mut self,
        result: Result<drafter_engine::DiagramBundle, drafter_engine::ClientError>,
    ) -> Result<drafter_core::GenerationOutcome, String> {
        match result {
            Ok(bundle) => {
                // A fresh image set invalidates every decoded texture.
                self.textures.begin(bundle.image_urls.len());
                self.zoom = ui::constants::DEFAULT_ZOOM;
                Ok(effects::bundle_to_outcome(bundle))
            }
            Err(err) => Err(err.to_string()),
        }
    }

    fn collect_timer_msgs(&mut self, out: &mut Vec<Msg>) {
        let view = self.state.view();

        match &view.notice {
            Some(notice) => match self.notice_shown {
                Some((id, shown_at)) if id == notice.id => {
                    if shown_at.elapsed() >= NOTICE_LIFETIME {
                        out.push(Msg::NoticeExpired { id });
                    }
                }
                _ => self.notice_shown = Some((notice.id, Instant::now())),
            },
            None => self.notice_shown = None,
        }

        let slideshow_running = matches!(
            &view.screen,
            ScreenView::Results(results) if results.fullscreen_index.is_some()
        );
        if slideshow_running {
            if self.last_slide.elapsed() >= SLIDESHOW_INTERVAL {
                self.last_slide = Instant::now();
                out.push(Msg::SlideshowTick);
            }
        } else {
            self.last_slide = Instant::now();
        }
    }
}

impl eframe::App for DrafterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Completions and timer messages are applied before this frame
        // renders, so their outcome is what the user sees.
        let mut pending = Vec::new();
        self.drain_engine(ctx, &mut pending);
        self.collect_timer_msgs(&mut pending);
        for msg in pending {
            self.apply(msg);
        }

        let view = self.state.view();
        let mut ui_msgs = Vec::new();
        ui::render::draw(ctx, &view, &self.textures, &mut self.zoom, &mut ui_msgs);
        ui::overlays::draw(ctx, &view, &self.textures, &mut ui_msgs);

        for msg in ui_msgs {
            // Manual slideshow navigation restarts the auto-advance clock.
            if matches!(
                msg,
                Msg::FullscreenOpened | Msg::FullscreenNext | Msg::FullscreenPrev
            ) {
                self.last_slide = Instant::now();
            }
            self.apply(msg);
        }

        ctx.request_repaint_after(POLL_INTERVAL);
    }
}
