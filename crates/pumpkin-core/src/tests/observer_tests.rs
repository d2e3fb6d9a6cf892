use super::*;
use std::rc::Rc;

type Calls = Rc<RefCell<Vec<&'static str>>>;

fn recorder(calls: &Calls, label: &'static str) -> impl FnMut(ListenerId) + 'static {
    let calls = Rc::clone(calls);
    move |_| calls.borrow_mut().push(label)
}

#[test]
fn dispatch_runs_listeners_in_registration_order() {
    let observer = LayoutObserver::new();
    let calls: Calls = Rc::default();
    observer.add_listener(recorder(&calls, "first"));
    observer.add_listener(recorder(&calls, "second"));

    observer.dispatch_layout();
    observer.dispatch_layout();

    assert_eq!(*calls.borrow(), vec!["first", "second", "first", "second"]);
}

#[test]
fn removed_listener_is_not_called() {
    let observer = LayoutObserver::new();
    let calls: Calls = Rc::default();
    let id = observer.add_listener(recorder(&calls, "gone"));
    observer.add_listener(recorder(&calls, "kept"));

    assert!(observer.remove_listener(id));
    assert!(!observer.remove_listener(id));
    observer.dispatch_layout();

    assert_eq!(*calls.borrow(), vec!["kept"]);
    assert_eq!(observer.listener_count(), 1);
}

#[test]
fn listener_can_remove_itself_while_dispatching() {
    let observer = Rc::new(LayoutObserver::new());
    let calls: Calls = Rc::default();
    let weak = Rc::downgrade(&observer);
    let log = Rc::clone(&calls);
    observer.add_listener(move |id| {
        if let Some(observer) = weak.upgrade() {
            observer.remove_listener(id);
        }
        log.borrow_mut().push("once");
    });

    observer.dispatch_layout();
    observer.dispatch_layout();

    assert_eq!(*calls.borrow(), vec!["once"]);
    assert_eq!(observer.listener_count(), 0);
}

#[test]
fn listener_added_during_dispatch_waits_for_next_pass() {
    let observer = Rc::new(LayoutObserver::new());
    let calls: Calls = Rc::default();
    let weak = Rc::downgrade(&observer);
    let log = Rc::clone(&calls);
    let mut added = false;
    observer.add_listener(move |_| {
        if !added {
            added = true;
            if let Some(observer) = weak.upgrade() {
                observer.add_listener(recorder(&log, "late"));
            }
        }
    });

    observer.dispatch_layout();
    assert!(calls.borrow().is_empty());

    observer.dispatch_layout();
    assert_eq!(*calls.borrow(), vec!["late"]);
}
