use std::sync::Arc;

use approx::assert_relative_eq;
use roentgen::{Catalog, Detector, Material, OpticalPath, Response, Stack, Thickness};

const ENERGIES: [f64; 5] = [2.0, 5.9, 8.0, 22.0, 60.0];

fn layer(catalog: &Catalog, id: &str, um: f64) -> Material {
    Material::new(catalog, id, Thickness::from_um(um), None).unwrap()
}

#[test]
fn test_stack_transmission_is_product() {
    let catalog = Catalog::bundled().unwrap();
    let pairs = [("Be", 25.0, "Si", 500.0), ("air", 1e4, "kapton", 50.0), ("Al", 10.0, "Au", 0.1)];
    for (a_id, a_um, b_id, b_um) in pairs {
        let a = layer(&catalog, a_id, a_um);
        let b = layer(&catalog, b_id, b_um);
        let stack = &a + &b;
        for e in ENERGIES {
            assert_relative_eq!(
                stack.transmission(e).unwrap(),
                a.transmission(e).unwrap() * b.transmission(e).unwrap(),
                max_relative = 1e-14
            );
            assert_relative_eq!(
                stack.absorption(e).unwrap(),
                1.0 - stack.transmission(e).unwrap()
            );
        }
    }
}

#[test]
fn test_stack_slice_input() {
    let catalog = Catalog::bundled().unwrap();
    let stack = Stack::new(vec![
        layer(&catalog, "Be", 25.0),
        layer(&catalog, "mylar", 6.0),
        layer(&catalog, "Al", 0.1),
    ]);
    let t = stack.transmission_many(&ENERGIES).unwrap();
    assert_eq!(t.len(), ENERGIES.len());
    assert!(t.iter().all(|&v| v > 0.0 && v < 1.0));
    assert_eq!(stack.absorption_many(&ENERGIES).unwrap().len(), ENERGIES.len());
    let name = stack.name();
    assert!(name.starts_with("Beryllium"), "{name}");
    assert!(name.contains("(Mylar)"), "{name}");
    assert!(name.find("Aluminum") > name.find("Mylar"), "{name}");
}

#[test]
fn test_stack_from_iterator() {
    let catalog = Catalog::bundled().unwrap();
    let stack: Stack = ["Be", "Si", "Ge"]
        .into_iter()
        .map(|id| layer(&catalog, id, 10.0))
        .collect();
    assert_eq!(stack.len(), 3);
}

#[test]
fn test_response_is_path_times_detector() {
    let catalog = Catalog::bundled().unwrap();
    let path = layer(&catalog, "air", 1e4) + layer(&catalog, "Be", 25.0);
    let detectors = [layer(&catalog, "Si", 500.0), layer(&catalog, "cdte", 1000.0)];

    for detector in detectors {
        let response = Response::new(path.clone(), detector.clone());
        for e in ENERGIES {
            assert_eq!(
                response.response(e).unwrap(),
                path.transmission(e).unwrap() * detector.absorption(e).unwrap()
            );
        }
        assert_eq!(
            response.response_many(&ENERGIES).unwrap().len(),
            ENERGIES.len()
        );
    }
}

#[test]
fn test_response_with_single_material_path() {
    let catalog = Catalog::bundled().unwrap();
    let window = layer(&catalog, "Be", 8.0);
    let detector = layer(&catalog, "Ge", 5000.0);
    let response = Response::new(window.clone(), detector.clone());
    assert!(matches!(response.optical_path(), OpticalPath::Material(_)));
    for e in ENERGIES {
        assert_eq!(
            response.response(e).unwrap(),
            window.transmission(e).unwrap() * detector.absorption(e).unwrap()
        );
    }
}

#[test]
fn test_ideal_detector_absorbs_everything() {
    let catalog = Catalog::bundled().unwrap();
    let path = layer(&catalog, "Be", 25.0);
    let response = Response::new(path.clone(), Detector::Ideal);
    assert_eq!(Detector::Ideal.absorption(1e9).unwrap(), 1.0);
    for e in ENERGIES {
        assert_eq!(response.response(e).unwrap(), path.transmission(e).unwrap());
    }
}

#[test]
fn test_compose_always_returns_stack() {
    let catalog = Catalog::bundled().unwrap();
    let be = layer(&catalog, "Be", 25.0);
    let si = layer(&catalog, "Si", 10.0);

    let a = OpticalPath::from(be.clone()).compose(si.clone());
    assert_eq!(a.len(), 2);
    let b = OpticalPath::from(a.clone()).compose(be.clone());
    assert_eq!(b.len(), 3);
    let c = OpticalPath::from(be.clone()).compose(a.clone());
    assert_eq!(c.materials()[0].name(), "Beryllium");
    assert_eq!(c.len(), 3);
    let d = OpticalPath::from(Stack::default()).compose(Stack::default());
    assert!(d.is_empty());
}

#[test]
fn test_thicker_detector_responds_more() {
    let catalog = Catalog::bundled().unwrap();
    let thin = Response::new(layer(&catalog, "Be", 25.0), layer(&catalog, "Si", 100.0));
    let thick = Response::new(layer(&catalog, "Be", 25.0), layer(&catalog, "Si", 1000.0));
    assert!(thick.response(15.0).unwrap() > thin.response(15.0).unwrap());
}

#[test]
fn test_response_shared_across_threads() {
    let catalog = Catalog::bundled().unwrap();
    let response = Arc::new(Response::new(
        layer(&catalog, "Be", 25.0) + layer(&catalog, "air", 5e4),
        layer(&catalog, "Si", 450.0),
    ));
    let expected = response.response_many(&ENERGIES).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let response = Arc::clone(&response);
            std::thread::spawn(move || response.response_many(&ENERGIES).unwrap())
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}
