use std::{
    thread,
    time::{Duration, Instant},
};
use winit::{
    event::{Event, WindowEvent},
    event_loop::ControlFlow,
};

use particle_drift::disc::{DiscInstance, DiscRenderer, ResolutionBuffer};
use particle_drift::renderer::Renderer;
use particle_drift::{ParticleField, PARTICLE_COUNT};

const FRAME_BUDGET: Duration = Duration::from_micros(16_666);

fn main() {
    env_logger::init();

    let event_loop = winit::event_loop::EventLoop::new();
    let window = winit::window::WindowBuilder::new()
        .with_title("Particle Drift")
        .build(&event_loop)
        .expect("Failed to create window");
    let mut renderer = futures::executor::block_on(Renderer::new(&window));
    let resolution_buffer = ResolutionBuffer::new(renderer.device());
    let mut disc_renderer = DiscRenderer::new(
        renderer.device(),
        renderer.config().format,
        &resolution_buffer,
        PARTICLE_COUNT as wgpu::BufferAddress,
    );

    // Particles are seeded once, against the dimensions at startup. A later
    // resize changes the surface and the wrap height, nothing else.
    let size = window.inner_size();
    let mut field = ParticleField::seed(
        &mut rand::thread_rng(),
        PARTICLE_COUNT,
        size.width as f32,
        size.height as f32,
    );
    resolution_buffer.set(&[size.width as f32, size.height as f32], renderer.queue());

    let mut last_frame_time = Instant::now();
    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => *control_flow = ControlFlow::Exit,
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => match event {
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(*physical_size);
                    field.set_resolution(physical_size.width as f32, physical_size.height as f32);
                    resolution_buffer.set(
                        &[physical_size.width as f32, physical_size.height as f32],
                        renderer.queue(),
                    );
                }
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    renderer.resize(**new_inner_size);
                    field.set_resolution(
                        new_inner_size.width as f32,
                        new_inner_size.height as f32,
                    );
                    resolution_buffer.set(
                        &[new_inner_size.width as f32, new_inner_size.height as f32],
                        renderer.queue(),
                    );
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                match renderer.surface().get_current_texture() {
                    Ok(surface_texture) => {
                        let view = surface_texture
                            .texture
                            .create_view(&wgpu::TextureViewDescriptor::default());
                        let mut encoder = renderer.device().create_command_encoder(
                            &wgpu::CommandEncoderDescriptor {
                                label: Some("Render encoder"),
                            },
                        );

                        let discs: Vec<DiscInstance> = field
                            .particles()
                            .iter()
                            .map(|p| DiscInstance {
                                center: [p.x, p.y],
                                radius: p.radius,
                            })
                            .collect();
                        disc_renderer.set_disc_buffer(renderer.queue(), &discs);
                        disc_renderer.render_all(
                            &mut encoder,
                            &view,
                            wgpu::LoadOp::Clear(wgpu::Color {
                                r: 0.0,
                                g: 0.0,
                                b: 0.0,
                                a: 1.0,
                            }),
                        );
                        renderer.queue().submit(std::iter::once(encoder.finish()));
                        surface_texture.present();

                        field.advance();
                    }
                    Err(wgpu::SurfaceError::Lost) => {
                        log::warn!("Surface lost, reconfiguring");
                        renderer.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of surface memory, exiting");
                        *control_flow = ControlFlow::Exit;
                    }
                    Err(e) => {
                        log::error!("Surface error: {:?}", e);
                    }
                };
                thread::sleep(FRAME_BUDGET.saturating_sub(last_frame_time.elapsed()));
                last_frame_time = Instant::now();
                window.request_redraw();
            }
            _ => (),
        }
    });
}
