//! Provides some useful macros to avoid repetitive code.

/// A macro to define typed access to a numeric route state on [crate::construction::states::RouteState].
macro_rules! custom_route_state {
    ($name:ident typeof $type:ty, $key:expr) => {
        paste::paste! {
            #[doc = " Extends [RouteState] within a typed `"$name "` route state."]
            pub trait [<$name RouteState>] {
                #[doc = " Gets `"$name "` route state."]
                fn [<get_ $name:snake:lower>](&self) -> Option<$type>;
                #[doc = " Sets `"$name "` route state."]
                fn [<set_ $name:snake:lower>](&mut self, value: $type);
            }

            impl [<$name RouteState>] for RouteState {
                fn [<get_ $name:snake:lower>](&self) -> Option<$type> {
                    self.get_route_state($key).map(<$type as StateValue>::from_state)
                }

                fn [<set_ $name:snake:lower>](&mut self, value: $type) {
                    self.put_route_state($key, value.into_state())
                }
            }
        }
    };
}

/// A macro to define typed access to a numeric activity state on [crate::construction::states::RouteState].
macro_rules! custom_activity_state {
    ($name:ident typeof $type:ty, $key:expr) => {
        paste::paste! {
            #[doc = " Extends [RouteState] within a typed `"$name "` activity state."]
            pub trait [<$name ActivityState>] {
                #[doc = " Gets `"$name "` state of activity at given tour index."]
                fn [<get_ $name:snake:lower _at>](&self, activity_idx: usize) -> Option<$type>;
                #[doc = " Sets `"$name "` state of activity at given tour index."]
                fn [<set_ $name:snake:lower _at>](&mut self, activity_idx: usize, value: $type);
            }

            impl [<$name ActivityState>] for RouteState {
                fn [<get_ $name:snake:lower _at>](&self, activity_idx: usize) -> Option<$type> {
                    self.get_activity_state($key, activity_idx).map(<$type as StateValue>::from_state)
                }

                fn [<set_ $name:snake:lower _at>](&mut self, activity_idx: usize, value: $type) {
                    self.put_activity_state($key, activity_idx, value.into_state())
                }
            }
        }
    };
}

/// A macro to define typed access to a vehicle dependent activity state, one value per fleet slot.
macro_rules! custom_slot_activity_state {
    ($name:ident typeof $type:ty, $key:expr) => {
        paste::paste! {
            #[doc = " Extends [RouteState] within a typed vehicle dependent `"$name "` activity state."]
            pub trait [<$name ActivityState>] {
                #[doc = " Gets `"$name "` state of activity at given tour index for given vehicle slot."]
                fn [<get_ $name:snake:lower _at>](&self, activity_idx: usize, slot: usize) -> Option<$type>;
                #[doc = " Sets `"$name "` state of activity at given tour index for given vehicle slot."]
                fn [<set_ $name:snake:lower _at>](&mut self, activity_idx: usize, slot: usize, value: $type);
            }

            impl [<$name ActivityState>] for RouteState {
                fn [<get_ $name:snake:lower _at>](&self, activity_idx: usize, slot: usize) -> Option<$type> {
                    self.get_activity_state($key.with_slot(slot), activity_idx).map(<$type as StateValue>::from_state)
                }

                fn [<set_ $name:snake:lower _at>](&mut self, activity_idx: usize, slot: usize, value: $type) {
                    self.put_activity_state($key.with_slot(slot), activity_idx, value.into_state())
                }
            }
        }
    };
}
