// ============================================================================
// REACTIVITY - Valor compartido con notificación a subscribers
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Estado reactivo: los clones comparten valor Y subscribers
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl<T> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Copia del valor actual
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    /// Leer sin clonar
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    /// Establecer nuevo valor y notificar
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar con closure y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut self.value.borrow_mut());
        self.notify();
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Los callbacks se copian antes de invocarse: un subscriber puede
    /// leer el valor o suscribir a otro sin provocar un doble borrow.
    fn notify(&self) {
        let callbacks: Vec<Callback> = self.subscribers.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_notifies_every_subscriber() {
        let state = ReactiveState::new(0);
        let hits = Rc::new(Cell::new(0));
        for _ in 0..2 {
            let hits = hits.clone();
            state.subscribe(move || hits.set(hits.get() + 1));
        }
        state.set(5);
        assert_eq!(state.get(), 5);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn clones_share_subscribers() {
        let state = ReactiveState::new(String::new());
        let seen = Rc::new(RefCell::new(String::new()));
        {
            let seen = seen.clone();
            let reader = state.clone();
            state.subscribe(move || *seen.borrow_mut() = reader.get());
        }
        state.clone().update(|s| s.push_str("/about"));
        assert_eq!(*seen.borrow(), "/about");
    }
}
