use mahvec::functions::PlusMult;
use mahvec::{DenseVector, Traverse, Vector};

fn main() {
    let mut v = DenseVector::from_slice(&[0.0, 5.0, 0.0, 0.0, -2.0, 0.0]);
    let w = DenseVector::from_slice(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);

    let dot = v.dot(&w).unwrap();
    println!("v = {:?}, v . w = {}, |v|^2 = {}", v, dot, v.length_squared());

    for (i, x) in v.iterate_non_zero() {
        println!("non-zero v[{}] = {}", i, x);
    }

    // v += 0.5 * w
    v.assign_with(&w, &PlusMult::new(0.5)).unwrap();
    println!("after axpy: {:?}", v.values());

    {
        let mut tail = v.view_part(3, 3).unwrap();
        tail.assign(0.0);
    }
    println!("tail zeroed: {:?}, norm1 = {}", v.values(), v.norm(1.0).unwrap());
}
