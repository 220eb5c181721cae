use bayesnet_core::domain::Domain;
use bayesnet_core::index_map::map;
use bayesnet_core::variable::Variable;

#[test]
fn spot_checks_from_the_four_variable_reference_cases() {
    let a = Variable::binary("a");
    let b = Variable::binary("b");
    let c = Variable::binary("c");
    let d = Variable::binary("d");

    let ab = Domain::new([a.clone(), b.clone()]).unwrap();
    assert_eq!(map(&ab, &ab).unwrap().as_slice(), &[0, 1, 2, 3]);

    let a_only = Domain::new([a.clone()]).unwrap();
    assert_eq!(map(&a_only, &ab).unwrap().as_slice(), &[0, 0, 1, 1]);

    let bca = Domain::new([b.clone(), c.clone(), a.clone()]).unwrap();
    let abc = Domain::new([a.clone(), b.clone(), c.clone()]).unwrap();
    assert_eq!(
        map(&bca, &abc).unwrap().as_slice(),
        &[0, 2, 4, 6, 1, 3, 5, 7]
    );

    let da = Domain::new([d.clone(), a.clone()]).unwrap();
    let abcd = Domain::new([a.clone(), b.clone(), c.clone(), d.clone()]).unwrap();
    assert_eq!(
        map(&da, &abcd).unwrap().as_slice(),
        &[0, 2, 0, 2, 0, 2, 0, 2, 1, 3, 1, 3, 1, 3, 1, 3]
    );
}

#[test]
fn map_onto_full_own_domain_is_the_identity_regardless_of_order() {
    let a = Variable::binary("a");
    let b = Variable::binary("b");
    let c = Variable::binary("c");

    for vars in [
        vec![a.clone(), b.clone(), c.clone()],
        vec![c.clone(), a.clone(), b.clone()],
        vec![b.clone(), c.clone(), a.clone()],
    ] {
        let d = Domain::new(vars).unwrap();
        let identity: Vec<usize> = (0..d.size()).collect();
        assert_eq!(map(&d, &d).unwrap().as_slice(), identity.as_slice());
    }
}

#[test]
fn map_is_a_surjection_with_balanced_fibers() {
    // Mapping a 2-variable sub-domain into a 4-variable domain (with two
    // free variables of sizes 2 and 3) should hit every sub-index exactly
    // `free_size` times.
    let a = Variable::binary("a");
    let b = Variable::new("b", 3);
    let c = Variable::binary("c");
    let d = Variable::binary("d");

    let full = Domain::new([a.clone(), b.clone(), c.clone(), d.clone()]).unwrap();
    let sub = Domain::new([a, c]).unwrap();
    let m = map(&sub, &full).unwrap();

    let free_size = full.size() / sub.size();
    let mut counts = vec![0usize; sub.size()];
    for &idx in m.as_slice() {
        counts[idx] += 1;
    }
    assert!(counts.iter().all(|&count| count == free_size));
}

#[test]
fn non_subset_domain_is_rejected() {
    let a = Variable::binary("a");
    let b = Variable::binary("b");
    let c = Variable::binary("c");
    let a_only = Domain::new([a]).unwrap();
    let bc = Domain::new([b, c]).unwrap();
    assert!(map(&a_only, &bc).is_err());
}
