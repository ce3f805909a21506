use std::time::Instant;

use crate::simulation::forces::Gravity;
use crate::simulation::links::{Link, Rod};
use crate::simulation::states::{NVec3, Particle};
use crate::simulation::world::World;

/// Time full physics steps (forces + integration) over growing particle
/// counts, with gravity paired to every particle.
pub fn bench_step() {
    // Different world sizes to test
    let ns = [200, 400, 800, 1600, 3200, 6400];
    let steps = 1000;

    for n in ns {
        let mut world = World::new(0, None);

        let gravity = world.force_registry_mut().register(Gravity {
            acceleration: NVec3::new(0.0, -9.81, 0.0),
        });

        for i in 0..n {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            let mut particle = Particle::new();
            particle.set_position(NVec3::new(
                (i_f * 0.37).sin() * 5.0,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0,
            ));
            particle.set_mass(1.0);
            particle.set_damping(0.995);
            let handle = world.particles_mut().add(particle);
            world.force_registry_mut().add(handle, gravity);
        }

        let start = Instant::now();
        for _ in 0..steps {
            world.start_frame();
            world.run_physics(0.001);
        }
        let elapsed = start.elapsed();

        println!(
            "bench_step: n = {:6}, {} steps in {:?} ({:.3} us/step)",
            n,
            steps,
            elapsed,
            elapsed.as_secs_f64() * 1.0e6 / steps as f64
        );
    }
}

/// Time contact generation + resolution on a hanging chain of rods.
pub fn bench_resolve() {
    let ns = [16, 64, 256, 1024];
    let steps = 1000;

    for n in ns {
        let mut world = World::new(n, None);

        let gravity = world.force_registry_mut().register(Gravity {
            acceleration: NVec3::new(0.0, -9.81, 0.0),
        });

        // A vertical chain: the top particle is immovable, each segment
        // starts slightly stretched so every rod emits a contact.
        let mut previous = {
            let mut anchor = Particle::new();
            anchor.set_position(NVec3::new(0.0, n as f64, 0.0));
            anchor.set_inverse_mass(0.0);
            world.particles_mut().add(anchor)
        };
        for i in 1..=n {
            let mut particle = Particle::new();
            particle.set_position(NVec3::new(0.0, n as f64 - i as f64 * 1.01, 0.0));
            particle.set_mass(1.0);
            particle.set_damping(0.99);
            let handle = world.particles_mut().add(particle);
            world.force_registry_mut().add(handle, gravity);
            world.add_contact_generator(Rod {
                link: Link::new(previous, handle),
                length: 1.0,
            });
            previous = handle;
        }

        let start = Instant::now();
        for _ in 0..steps {
            world.start_frame();
            world.run_physics(0.001);
        }
        let elapsed = start.elapsed();

        println!(
            "bench_resolve: n = {:5} rods, {} steps in {:?} ({:.3} us/step)",
            n,
            steps,
            elapsed,
            elapsed.as_secs_f64() * 1.0e6 / steps as f64
        );
    }
}
