use crate::rendering::{beach_palette, BitmapRenderer, Palette};
use crate::ui::canvas::scene::{Demo, MeshSettings, MAX_CELLS};
use crate::ui::canvas::Canvas;
use crate::warp::WarpConfig;

pub const BITMAP_WIDTH: usize = 320;
pub const BITMAP_HEIGHT: usize = 240;

#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct MeshWarpApp {
    seed: u32,
    demo: Demo,
    mesh: MeshSettings,
    warp: WarpConfig,
    show_wireframe: bool,
    parallel: bool,

    #[serde(skip)]
    canvas: Option<Canvas>,
    #[serde(skip)]
    renderer: BitmapRenderer,
    #[serde(skip)]
    palette: Palette,
    #[serde(skip)]
    texture_dirty: bool,
}

impl Default for MeshWarpApp {
    fn default() -> Self {
        Self {
            seed: 1,
            demo: Demo::BitmapMesh,
            mesh: MeshSettings::default(),
            warp: WarpConfig::default(),
            show_wireframe: false,
            parallel: cfg!(not(target_arch = "wasm32")),
            canvas: None,
            renderer: BitmapRenderer::new(BITMAP_WIDTH, BITMAP_HEIGHT),
            palette: beach_palette(),
            texture_dirty: true,
        }
    }
}

impl MeshWarpApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        if let Some(storage) = cc.storage {
            if let Some(app) = eframe::get_value::<MeshWarpApp>(storage, eframe::APP_KEY) {
                log::info!("Restored settings: {:?} {:?}", app.mesh, app.warp);
                return app;
            }
        }
        Default::default()
    }

    fn canvas(&mut self) -> &mut Canvas {
        let (mesh, warp, parallel) = (self.mesh, self.warp, self.parallel);
        self.canvas.get_or_insert_with(|| {
            let mut canvas = Canvas::new([BITMAP_WIDTH, BITMAP_HEIGHT], mesh, warp);
            canvas.mesh_scene.warper_mut().set_parallel(parallel);
            canvas
        })
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if self.texture_dirty {
            self.renderer.upload(ctx, self.seed, &self.palette);
            if let Some(texture) = self.renderer.texture() {
                let size = self.renderer.size();
                self.canvas().set_texture(texture, size);
            }
            self.texture_dirty = false;
        }
    }

    fn sync_canvas(&mut self) {
        let (demo, mesh, warp, wireframe, parallel) = (
            self.demo,
            self.mesh,
            self.warp,
            self.show_wireframe,
            self.parallel,
        );
        let canvas = self.canvas();
        canvas.active = demo;
        canvas.show_wireframe = wireframe;
        canvas.set_mesh_settings(mesh);
        canvas.set_warp_config(warp);
        canvas.mesh_scene.warper_mut().set_parallel(parallel);
    }
}

impl eframe::App for MeshWarpApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.heading("Mesh warp gallery");
            ui.label("Press and drag on the bitmap to pull the mesh. Esc restores it.");
        });

        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("Demo");
            for demo in Demo::ALL {
                ui.radio_value(&mut self.demo, demo, demo.label());
            }

            ui.separator();
            ui.heading("Bitmap");
            ui.horizontal(|ui| {
                ui.label("Seed");
                if ui
                    .add(egui::DragValue::new(&mut self.seed).speed(1))
                    .changed()
                {
                    self.texture_dirty = true;
                }
                if ui.button("Randomize").clicked() {
                    self.seed = rand::random();
                    self.texture_dirty = true;
                }
            });

            ui.add_enabled_ui(self.demo == Demo::BitmapMesh, |ui| {
                ui.separator();
                ui.heading("Mesh");
                ui.add(egui::Slider::new(&mut self.mesh.cols, 1..=MAX_CELLS).text("Columns"));
                ui.add(egui::Slider::new(&mut self.mesh.rows, 1..=MAX_CELLS).text("Rows"));
                ui.add(
                    egui::Slider::new(&mut self.warp.strength, 0.0..=100_000.0)
                        .logarithmic(true)
                        .text("Strength"),
                );
                ui.label(format!("Snap radius: {:.1}", self.warp.snap_radius()));
                ui.checkbox(&mut self.show_wireframe, "Wireframe");
                ui.checkbox(&mut self.parallel, "Parallel warp");
                if ui.button("Reset defaults").clicked() {
                    self.mesh = MeshSettings::default();
                    self.warp = WarpConfig::default();
                }
            });

            if ui.button("Restore scene").clicked() {
                self.canvas().reset();
            }
        });

        self.ensure_texture(ctx);
        self.sync_canvas();

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let canvas = self.canvas();
            let text = match canvas.active {
                Demo::BitmapMesh => {
                    let warper = canvas.mesh_scene.warper();
                    match warper.focus() {
                        Some(focus) => format!(
                            "{} points | focus ({:.0}, {:.0})",
                            warper.grid().len(),
                            focus.x,
                            focus.y
                        ),
                        None => format!("{} points | no focus", warper.grid().len()),
                    }
                }
                Demo::Vertices => {
                    let center = canvas.vertices_scene.fan().center();
                    format!("Fan centre ({:.0}, {:.0})", center.x, center.y)
                }
            };
            ui.label(text);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::default())
            .show(ctx, |ui| {
                ui.add(self.canvas());
            });
    }
}
