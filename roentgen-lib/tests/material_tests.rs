use std::collections::HashMap;

use approx::assert_relative_eq;
use roentgen::{Catalog, Density, Material, MaterialSpec, RoentgenError, Thickness};

const ENERGIES: [f64; 6] = [1.5, 5.0, 10.0, 30.0, 100.0, 1000.0];

#[test]
fn test_opaque_for_every_material() {
    let catalog = Catalog::bundled().unwrap();
    for entry in catalog.materials() {
        let m = Material::new(&catalog, entry.symbol.as_str(), Thickness::from_Mm(500.0), None)
            .unwrap();
        let t = m.transmission(1.0).unwrap();
        assert!(t < 1e-6, "{} transmits {t}", entry.symbol);
    }
}

#[test]
fn test_transparent_for_every_material() {
    let catalog = Catalog::bundled().unwrap();
    for entry in catalog.materials() {
        let m = Material::new(&catalog, entry.symbol.as_str(), Thickness::from_pm(1e-6), None)
            .unwrap();
        let t = m.transmission(1.0).unwrap();
        assert!(t > 0.9, "{} transmits {t}", entry.symbol);
    }
}

#[test]
fn test_silicon_wafer() {
    let catalog = Catalog::bundled().unwrap();
    let si = Material::new(&catalog, "Si", Thickness::from_um(500.0), None).unwrap();
    let t = si.transmission(10.0).unwrap();
    assert!(t > 0.0 && t < 1.0);
    assert_relative_eq!(t, (-33.89_f64 * 2.33 * 0.05).exp(), max_relative = 1e-9);
    assert_relative_eq!(si.absorption(10.0).unwrap(), 1.0 - t);
    assert_relative_eq!(
        si.linear_attenuation_coefficient(10.0).unwrap(),
        33.89 * 2.33,
        max_relative = 1e-9
    );
    assert_eq!(si.name(), "Silicon");
    assert_eq!(si.symbols(), vec!["Si"]);
}

#[test]
fn test_transmission_falls_with_thickness() {
    let catalog = Catalog::bundled().unwrap();
    let mut previous = 1.0;
    for um in [1.0, 10.0, 100.0, 500.0, 1000.0, 5000.0] {
        let si = Material::new(&catalog, "Si", Thickness::from_um(um), None).unwrap();
        let t = si.transmission(10.0).unwrap();
        assert!(t < previous, "{um} um: {t} >= {previous}");
        previous = t;
    }
}

#[test]
fn test_mixture_density_is_mass_weighted() {
    let catalog = Catalog::bundled().unwrap();
    let t = Thickness::from_um(100.0);
    let fe = catalog.get_material_density("Fe").unwrap().g_per_cm3();
    let c = catalog.get_material_density("C").unwrap().g_per_cm3();

    let half = Material::new(&catalog, [("Fe", 0.5), ("C", 0.5)], t, None).unwrap();
    assert_relative_eq!(half.density().g_per_cm3(), 0.5 * fe + 0.5 * c);

    let unnormalized = Material::new(&catalog, [("Fe", 1.0), ("C", 1.0)], t, None).unwrap();
    assert_relative_eq!(unnormalized.density().g_per_cm3(), half.density().g_per_cm3());
    assert_eq!(unnormalized.mass_fractions(), vec![0.5, 0.5]);

    let steel = Material::new(&catalog, [("Fe", 0.98), ("C", 0.02)], t, None).unwrap();
    assert_relative_eq!(steel.density().g_per_cm3(), 0.98 * fe + 0.02 * c, max_relative = 1e-12);
}

#[test]
fn test_mixture_coefficient_is_mass_weighted() {
    let catalog = Catalog::bundled().unwrap();
    let t = Thickness::from_um(100.0);
    let steel = Material::new(&catalog, [("Fe", 98.0), ("C", 2.0)], t, None).unwrap();
    let fe = catalog.curve("Fe").unwrap();
    let c = catalog.curve("C").unwrap();
    for e in ENERGIES {
        let expected = 0.98 * fe.evaluate(e).unwrap() + 0.02 * c.evaluate(e).unwrap();
        assert_relative_eq!(
            steel.mass_attenuation_coefficient(e).unwrap(),
            expected,
            max_relative = 1e-12
        );
    }
    assert_eq!(steel.name(), "Iron + Carbon");
}

#[test]
fn test_mixture_from_map() {
    let catalog = Catalog::bundled().unwrap();
    let parts: HashMap<String, f64> = [("Cu".to_string(), 3.0), ("Au".to_string(), 1.0)]
        .into_iter()
        .collect();
    let m = Material::new(&catalog, parts, Thickness::from_um(1.0), None).unwrap();
    assert_eq!(m.symbols(), vec!["Au", "Cu"]);
    assert_eq!(m.mass_fractions(), vec![0.25, 0.75]);
}

#[test]
fn test_mixture_with_unknown_component() {
    let catalog = Catalog::bundled().unwrap();
    let t = Thickness::from_um(1.0);
    for parts in [[("Fe", 0.9), ("unobtainium", 0.1)], [("Fe", 0.9), ("Pb", 0.1)]] {
        assert!(matches!(
            Material::new(&catalog, parts, t, None),
            Err(RoentgenError::MaterialNotFound(_))
        ));
    }
}

#[test]
fn test_scalar_and_slice_inputs() {
    let catalog = Catalog::bundled().unwrap();
    for entry in catalog.materials() {
        let m = Material::new(&catalog, entry.symbol.as_str(), Thickness::from_um(50.0), None)
            .unwrap();
        let t = m.transmission_many(&ENERGIES).unwrap();
        let a = m.absorption_many(&ENERGIES).unwrap();
        let mu = m.mass_attenuation_coefficient_many(&ENERGIES).unwrap();
        let lin = m.linear_attenuation_coefficient_many(&ENERGIES).unwrap();
        assert_eq!(t.len(), ENERGIES.len());
        assert_eq!(a.len(), ENERGIES.len());
        assert_eq!(mu.len(), ENERGIES.len());
        assert_eq!(lin.len(), ENERGIES.len());
        for (i, &e) in ENERGIES.iter().enumerate() {
            assert_eq!(t[i], m.transmission(e).unwrap());
            assert_eq!(a[i], m.absorption(e).unwrap());
            assert_eq!(mu[i], m.mass_attenuation_coefficient(e).unwrap());
        }
    }
}

#[test]
fn test_out_of_range_energy_propagates() {
    let catalog = Catalog::bundled().unwrap();
    let m = Material::new(&catalog, "Be", Thickness::from_um(25.0), None).unwrap();
    assert!(matches!(
        m.transmission(0.1),
        Err(RoentgenError::EnergyOutOfRange { .. })
    ));
    assert!(m.transmission_many(&[5.0, 0.1]).is_err());
}

#[test]
fn test_explicit_density_and_name() {
    let catalog = Catalog::bundled().unwrap();
    let t = Thickness::from_mm(1.0);
    let reference = Material::new(&catalog, "water", t, None).unwrap();
    let ice = Material::new(&catalog, "water", t, Some(Density::from_g_per_cm3(0.917)))
        .unwrap()
        .with_name("ice");
    assert_eq!(reference.name(), "Water (liquid)");
    assert_eq!(ice.name(), "ice");
    assert_relative_eq!(ice.density().g_per_cm3(), 0.917);
    assert!(ice.transmission(5.0).unwrap() > reference.transmission(5.0).unwrap());
}

#[test]
fn test_compound_by_name() {
    let catalog = Catalog::bundled().unwrap();
    let spec = MaterialSpec::from("Polyethylene Terephthalate (Mylar)");
    let m = Material::new(&catalog, spec, Thickness::from_um(6.0), None).unwrap();
    assert_eq!(m.symbols(), vec!["mylar"]);
    assert_relative_eq!(m.density().g_per_cm3(), 1.38);
}

#[test]
fn test_air_from_ideal_gas_density() {
    let catalog = Catalog::bundled().unwrap();
    let density = roentgen::density_ideal_gas(101_325.0, 288.15).unwrap();
    let air = Material::new(&catalog, "air", Thickness::from_cm(10.0), Some(density)).unwrap();
    assert_relative_eq!(air.density().kg_per_m3(), 1.225, max_relative = 1e-4);
    let t = air.transmission(6.0).unwrap();
    assert!(t > 0.0 && t < 1.0);
}
