use test_log::test;

use crate::intern::{Address, Context, MethodLocal};
use crate::ir::{AllocSite, CallEdge, Field, Local, Method};
use crate::session::{Options, Session};
use crate::state::{FrameHeapStatics, LocalizeScope, States};
use crate::value::{Opaque, Value};
use crate::value_set::ValueSet;
use rustc_hash::FxHashSet;


struct Program {
    session: Session,
    context: Context,
    x: MethodLocal,
    addr1: Address,
    addr2: Address,
    field: Field,
}

impl Program {
    fn new() -> Program {
        let taint = Field::new("java.lang.Object", "double", "taint").unwrap();
        let session = Session::new(Options::new(taint));
        let main = Method::new("com.example.Main", "main", vec![], "void").unwrap();
        let interners = session.interners();
        let context = interners.context(&CallEdge::entry(main.clone()), &CallEdge::entry(main.clone()));
        let x = interners.local(&main, &Local::new("x", "com.example.Node").unwrap());
        let addr1 = interners.address(&AllocSite::new(1, "com.example.Node", Some(&main)).unwrap());
        let addr2 = interners.address(&AllocSite::new(2, "com.example.Node", Some(&main)).unwrap());
        Program {
            session,
            context,
            x,
            addr1,
            addr2,
            field: Field::new("com.example.Node", "java.lang.Object", "next").unwrap(),
        }
    }

    /// A branch which writes `x := address` and sets fields on both
    /// addresses.
    fn branch(&self, address: &Address) -> FrameHeapStatics {
        let interners = self.session.interners();
        let mut fhs = FrameHeapStatics::empty();
        fhs.frame_mut()
            .put_strong(self.x.clone(), ValueSet::singleton(address.clone()));
        let instances = fhs.heap_mut().instances_mut();
        instances.put_weak_field(
            interners,
            &self.addr1,
            &self.field,
            &ValueSet::singleton(self.addr2.clone()),
        );
        instances.put_weak_field(
            interners,
            &self.addr2,
            self.session.options().taint_field(),
            &ValueSet::singleton(Opaque::taint("DEVICE_ID")),
        );
        fhs
    }
}

#[test]
fn branches_merge_and_collect() {
    let program = Program::new();
    let lhs = program.branch(&program.addr1);
    let rhs = program.branch(&program.addr2);

    let merged = lhs.merge(&rhs);
    assert_eq!(
        *merged.frame().get(&program.x),
        ValueSet::from(vec![
            Value::from(program.addr1.clone()),
            Value::from(program.addr2.clone()),
        ])
    );
    assert_eq!(merged.heap(), lhs.heap());

    assert!(merged.heap().gc(&FxHashSet::default()).is_empty());
    assert_eq!(merged.gc(), merged);
    // Only addr2 is reachable from rhs, so addr1.next goes.
    assert_eq!(rhs.gc().heap().instances().len(), 1);
    assert_eq!(lhs.gc(), lhs);
}

#[test]
fn states_drive_a_fixed_point() {
    let program = Program::new();
    let mut states = States::new();

    // First iteration: everything is new.
    let next = {
        let mut next = States::new();
        next.put(program.context.clone(), program.branch(&program.addr1));
        next
    };
    let delta = next.minus(&states);
    assert_eq!(delta, next);
    states = states.merge(&next);

    // Second iteration: the other branch adds addr2 to x.
    let mut next = States::new();
    next.put(program.context.clone(), program.branch(&program.addr2));
    let delta = next.minus(&states);
    assert_eq!(delta.len(), 1);
    assert_eq!(
        *delta.get(&program.context).frame().get(&program.x),
        ValueSet::singleton(program.addr2.clone())
    );
    assert!(delta.get(&program.context).heap().is_empty());
    states = states.merge(&next);

    // Third iteration: nothing new, so the fixed point is reached.
    let delta = next.minus(&states);
    assert!(delta.is_empty());
}

#[test]
fn minus_of_literal_states() {
    let program = Program::new();
    let mut a = States::new();
    let mut fhs = FrameHeapStatics::empty();
    fhs.frame_mut()
        .put_strong(program.x.clone(), ValueSet::singleton(program.addr1.clone()));
    a.put(program.context.clone(), fhs);

    assert_eq!(a.minus(&States::new()), a);
    assert!(a.minus(&a).is_empty());
}

#[test]
fn localize_at_a_call() {
    let program = Program::new();
    let caller = program.branch(&program.addr1).merge(&program.branch(&program.addr2));
    let callee_frame = caller
        .frame()
        .with_receivers_and_parameters(Default::default(), Default::default());

    let interners = program.session.interners();
    let scope = LocalizeScope::new(
        vec![interners.address_field(&program.addr1, &program.field)],
        vec![],
        vec![],
    );
    let localized = program
        .session
        .localize(&caller, callee_frame.clone(), &scope);
    assert_eq!(localized.heap(), caller.heap());

    let localized = program
        .session
        .localize(&caller, callee_frame, &LocalizeScope::default());
    assert_eq!(localized.heap().instances().len(), 1);
    assert_eq!(
        *localized.heap().instances().get_field(
            interners,
            &program.addr2,
            program.session.options().taint_field()
        ),
        ValueSet::singleton(Opaque::taint("DEVICE_ID"))
    );
}

#[test]
fn interning_across_threads() {
    let program = Program::new();
    let site = AllocSite::new(1, "com.example.Node", None).unwrap();
    let interners = program.session.interners();

    let addresses: Vec<Address> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| interners.address(&site)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for address in &addresses {
        assert!(address.ptr_eq(&addresses[0]));
    }
    // A site in a method is a different site.
    assert_ne!(addresses[0], program.addr1);
}

#[cfg(feature = "thread_safe")]
#[test]
fn states_are_shared_with_workers() {
    let program = Program::new();
    let mut states = States::new();
    states.put(program.context.clone(), program.branch(&program.addr1));

    let roots: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|_| scope.spawn(|| states.get(&program.context).roots().len()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });
    assert_eq!(roots, vec![1, 1]);
}
