// Copyright 2025 Irreducible Inc.

//! Every in-place operation must stop allocating once its destination has grown to the working
//! size. The global allocator of this test binary counts the allocations of the current thread.

use std::{
	alloc::{GlobalAlloc, Layout, System},
	cell::Cell,
	collections::HashMap,
};

use linquad_math::{
	vector_ops::{bilinearmul, matvecmul, scale, vcat, vecadd, vecdot, vecdot_linear, vecsubtract},
	AffineFunction, LinearTerm, MulAdd, QuadraticFunction, QuadraticTerm, Variable,
};
use linquad_utils::array_2d::Array2D;
use rand::{rngs::StdRng, Rng, SeedableRng};

struct CountingAllocator;

thread_local! {
	static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

fn record_allocation() {
	let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
}

unsafe impl GlobalAlloc for CountingAllocator {
	unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
		record_allocation();
		System.alloc(layout)
	}

	unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
		record_allocation();
		System.alloc_zeroed(layout)
	}

	unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
		record_allocation();
		System.realloc(ptr, layout, new_size)
	}

	unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
		System.dealloc(ptr, layout)
	}
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

const WARM_RUNS: usize = 16;

/// Runs `op` once to size the destinations, then asserts that further runs do not allocate.
fn assert_allocation_free(name: &str, mut op: impl FnMut()) {
	op();

	let before = ALLOCATIONS.with(Cell::get);
	for _ in 0..WARM_RUNS {
		op();
	}
	let allocations = ALLOCATIONS.with(Cell::get) - before;
	assert_eq!(allocations, 0, "{name} allocated {allocations} times after warm-up");
}

fn random_affine(rng: &mut StdRng, n_terms: usize, n_vars: usize) -> AffineFunction<f64> {
	let linear = (0..n_terms)
		.map(|_| LinearTerm::new(rng.gen_range(-10.0..10.0), Variable::new(rng.gen_range(0..n_vars))))
		.collect();
	AffineFunction::new(linear, rng.gen_range(-10.0..10.0))
}

fn random_quadratic(rng: &mut StdRng, n_terms: usize, n_vars: usize) -> QuadraticFunction<f64> {
	let quadratic = (0..n_terms)
		.map(|_| {
			QuadraticTerm::new(
				rng.gen_range(-10.0..10.0),
				Variable::new(rng.gen_range(0..n_vars)),
				Variable::new(rng.gen_range(0..n_vars)),
			)
		})
		.collect();
	QuadraticFunction::new(quadratic, random_affine(rng, n_terms, n_vars))
}

fn variables(n: usize) -> Vec<Variable> {
	(0..n).map(Variable::new).collect()
}

#[test]
fn test_repeated_assign_mul() {
	let mut rng = StdRng::seed_from_u64(0);
	let x = random_affine(&mut rng, 20, 10);
	let y = random_affine(&mut rng, 30, 10);

	let mut quadratic = QuadraticFunction::<f64>::zero();
	assert_allocation_free("quadratic assign_mul", || {
		quadratic.assign_mul(&x, &y);
	});
	assert_eq!(quadratic.quadratic().len(), 600);

	let mut affine = AffineFunction::<f64>::zero();
	assert_allocation_free("affine assign_mul", || {
		affine.assign_mul(&x, &2.5f64);
		affine.assign_mul(&-1i32, &y);
	});

	let mut terms = QuadraticFunction::<f64>::zero();
	assert_allocation_free("term products", || {
		terms
			.assign_mul(&Variable::new(1), &Variable::new(2))
			.muladd(&LinearTerm::new(2.0f64, Variable::new(3)), &x)
			.muladd(&3i32, &QuadraticTerm::new(1.0f64, Variable::new(0), Variable::new(4)));
	});
}

#[test]
fn test_assignment_and_accumulation() {
	let mut rng = StdRng::seed_from_u64(1);
	let f = random_affine(&mut rng, 40, 20);
	let g = random_affine(&mut rng, 25, 20);
	let q = random_quadratic(&mut rng, 30, 20);

	let mut affine = AffineFunction::<f64>::zero();
	assert_allocation_free("affine copy and accumulate", || {
		affine
			.copy_from(&f)
			.add_in_place(&g)
			.subtract_in_place(&Variable::new(3))
			.add_in_place(&LinearTerm::new(1i32, Variable::new(4)))
			.add_in_place(&7i64);
		affine.assign_add(&f, &g);
		affine.assign_sub(&g, &f);
	});

	let mut quadratic = QuadraticFunction::<f64>::zero();
	assert_allocation_free("quadratic copy and accumulate", || {
		quadratic
			.copy_from(&q)
			.add_in_place(&f)
			.subtract_in_place(&q)
			.add_in_place(&QuadraticTerm::new(1.0f32, Variable::new(1), Variable::new(1)));
		quadratic.assign_add(&q, &g);
		quadratic.assign_sub(&f, &q);
	});
}

#[test]
fn test_canonicalize_and_prune() {
	let mut rng = StdRng::seed_from_u64(2);
	let f = random_affine(&mut rng, 200, 30);
	let q = random_quadratic(&mut rng, 200, 15);

	let mut affine = AffineFunction::<f64>::zero();
	assert_allocation_free("affine canonicalize", || {
		affine
			.copy_from(&f)
			.canonicalize_in_place()
			.prune_zero_in_place(1.0);
	});
	assert!(affine.is_canonical());

	let mut quadratic = QuadraticFunction::<f64>::zero();
	assert_allocation_free("quadratic canonicalize", || {
		quadratic
			.copy_from(&q)
			.canonicalize_in_place()
			.prune_zeros_in_place();
	});
	assert!(quadratic.is_canonical());
}

#[test]
fn test_evaluate() {
	let mut rng = StdRng::seed_from_u64(3);
	let q = random_quadratic(&mut rng, 50, 10);
	let dense = (0..10).map(|i| i as f64 * 0.5).collect::<Vec<_>>();
	let sparse = (0..10)
		.map(|i| (Variable::new(i), i as f64 * 0.5))
		.collect::<HashMap<_, _>>();

	let mut total = 0.0;
	assert_allocation_free("evaluate", || {
		total += q.evaluate(&dense).unwrap_or_default();
		total -= q.evaluate(&sparse).unwrap_or_default();
	});
}

#[test]
fn test_vector_operations() {
	let mut rng = StdRng::seed_from_u64(4);
	let n = 16;
	let vars = variables(n);
	let coeffs = (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect::<Vec<f64>>();
	let functions = (0..n)
		.map(|_| random_affine(&mut rng, 5, n))
		.collect::<Vec<_>>();
	let matrix = Array2D::from_data(n, n, (0..n * n).map(|k| k as f64).collect::<Vec<_>>())
		.expect("square matrix");

	let mut affine = AffineFunction::<f64>::zero();
	let mut quadratic = QuadraticFunction::<f64>::zero();
	assert_allocation_free("vecdot", || {
		vecdot(&mut affine, &coeffs, &functions).unwrap();
		vecdot(&mut quadratic, &vars, &functions).unwrap();
		vecdot_linear(&mut affine, &coeffs, &vars).unwrap();
	});

	let mut sums = Vec::<AffineFunction<f64>>::new();
	assert_allocation_free("vecadd and vecsubtract", || {
		vecadd(&mut sums, &functions, &vars).unwrap();
		vecsubtract(&mut sums, &vars, &functions).unwrap();
	});

	let mut products = vec![AffineFunction::<f64>::zero(); n];
	assert_allocation_free("matvecmul", || {
		matvecmul(&mut products, &matrix, &vars).unwrap();
		matvecmul(&mut products, &matrix, &functions).unwrap();
	});

	assert_allocation_free("bilinearmul", || {
		bilinearmul(&mut quadratic, &matrix, &vars, &vars).unwrap();
	});

	let mut scaled = Vec::<AffineFunction<f64>>::new();
	assert_allocation_free("scale", || {
		scale(&mut scaled, &functions, &0.5f64);
		scale(&mut scaled, &vars, &2i32);
	});

	let mut stacked = vec![AffineFunction::<f64>::zero(); 2 * n];
	assert_allocation_free("vcat", || {
		vcat(&mut stacked, &[&functions, &products]).unwrap();
	});
}
